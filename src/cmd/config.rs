//! Configuration view and validation commands: `folio config`.

use std::path::Path;

use anyhow::Result;
use console::style;

use folio::folio_config::FolioToml;
use folio::ui::{CHECK, WARN};

use super::super::ConfigCommands;

fn print_effective(config: &FolioToml) {
    println!("[server]");
    println!("  port = {}", config.server.port);
    println!("  host = \"{}\"", config.server.host);
    println!("  dev = {}", config.server.dev);
    println!();
    println!("[store]");
    println!("  account_id = {}", config.store.account_id);
    println!("  read_latency_ms = {}", config.store.read_latency_ms);
    println!("  replace_latency_ms = {}", config.store.replace_latency_ms);
    println!();
    println!("[staleness]");
    println!("  poll_interval_ms = {}", config.staleness.poll_interval_ms);
    println!("  bus_capacity = {}", config.staleness.bus_capacity);
    println!();
    println!("[dashboard]");
    println!("  unknown_field_policy = \"{}\"", config.dashboard.unknown_field_policy);
    println!();
    println!("[logging]");
    println!("  json = {}", config.logging.json);
    println!();
}

pub fn cmd_config(config_path: &Path, config: &FolioToml, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("{}", style("Folio Configuration").bold());
            println!("===================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No folio.toml found at {}. Using defaults.", config_path.display());
            }
            println!();
            println!("Effective values (with env overrides):");
            println!();
            print_effective(config);

            if !config_path.exists() {
                println!("Run 'folio config init' to create a folio.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("{}No folio.toml found. Using defaults (valid).", CHECK);
                return Ok(());
            }

            let warnings = config.validate();
            if warnings.is_empty() {
                println!("{}Configuration is valid.", CHECK);
            } else {
                println!("{}Configuration warnings:", WARN);
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("folio.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            FolioToml::default().save(config_path)?;

            println!("{}Created folio.toml at {}", CHECK, config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [server] port, host, dev");
            println!("  - [store] account_id and simulated latency");
            println!("  - [staleness] poll_interval_ms, bus_capacity");
            println!("  - [dashboard] unknown_field_policy (skip | reject)");
            println!();
        }
    }

    Ok(())
}
