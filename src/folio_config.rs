//! Configuration for folio, read from `folio.toml`.
//!
//! Settings are layered file → environment → CLI. Every key is optional.
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! port = 3141
//! host = "127.0.0.1"
//! dev = false
//!
//! [store]
//! account_id = 25
//! read_latency_ms = 100
//! replace_latency_ms = 200
//!
//! [staleness]
//! poll_interval_ms = 500
//! bus_capacity = 64
//!
//! [dashboard]
//! unknown_field_policy = "skip"
//!
//! [logging]
//! json = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::collection::UnknownFieldPolicy;
use crate::profile::RegistryOptions;
use crate::store::StoreLatency;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    /// Permissive CORS for a frontend dev server on another origin.
    #[serde(default)]
    pub dev: bool,
}

fn default_port() -> u16 {
    3141
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            dev: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_account_id")]
    pub account_id: i64,
    /// Artificial delay before a read resolves.
    #[serde(default = "default_read_latency_ms")]
    pub read_latency_ms: u64,
    /// Artificial delay before a replace resolves.
    #[serde(default = "default_replace_latency_ms")]
    pub replace_latency_ms: u64,
}

fn default_account_id() -> i64 {
    25
}

fn default_read_latency_ms() -> u64 {
    100
}

fn default_replace_latency_ms() -> u64 {
    200
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            account_id: default_account_id(),
            read_latency_ms: default_read_latency_ms(),
            replace_latency_ms: default_replace_latency_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StalenessConfig {
    /// How often a mounted display checks its flag.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Invalidations buffered per subscriber before it lags.
    #[serde(default = "default_bus_capacity")]
    pub bus_capacity: usize,
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_bus_capacity() -> usize {
    64
}

impl Default for StalenessConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            bus_capacity: default_bus_capacity(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub unknown_field_policy: UnknownFieldPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

/// Root of `folio.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioToml {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub staleness: StalenessConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FolioToml {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse folio.toml")
    }

    /// Load `path` if it exists, otherwise the defaults. Environment
    /// overrides are applied either way.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize folio.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Apply `FOLIO_PORT` and `FOLIO_UNKNOWN_FIELD_POLICY`.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("FOLIO_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid FOLIO_PORT '{}'", port))?;
        }
        if let Ok(policy) = std::env::var("FOLIO_UNKNOWN_FIELD_POLICY") {
            self.dashboard.unknown_field_policy = policy.parse()?;
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.staleness.poll_interval_ms)
    }

    pub fn store_latency(&self) -> StoreLatency {
        StoreLatency {
            read: Duration::from_millis(self.store.read_latency_ms),
            replace: Duration::from_millis(self.store.replace_latency_ms),
        }
    }

    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            account_id: self.store.account_id,
            latency: self.store_latency(),
            policy: self.dashboard.unknown_field_policy,
            bus_capacity: self.staleness.bus_capacity,
        }
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0: an ephemeral port will be picked at startup".to_string());
        }
        if self.staleness.poll_interval_ms == 0 {
            warnings.push("staleness.poll_interval_ms must be greater than 0".to_string());
        }
        if self.staleness.bus_capacity == 0 {
            warnings.push("staleness.bus_capacity is 0: it will be raised to 1".to_string());
        }
        if self.store.read_latency_ms > 10_000 || self.store.replace_latency_ms > 10_000 {
            warnings.push(format!(
                "Store latency of {}ms/{}ms will make every request very slow",
                self.store.read_latency_ms, self.store.replace_latency_ms
            ));
        }
        if self.server.dev && self.server.host != "127.0.0.1" && self.server.host != "localhost" {
            warnings.push(format!(
                "Dev mode enables permissive CORS while listening on '{}'",
                self.server.host
            ));
        }

        warnings
    }
}
