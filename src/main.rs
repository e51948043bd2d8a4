use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use folio::folio_config::{CONFIG_FILE, FolioToml};

mod cmd;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Profile sections with ordered, editable field collections")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to folio.toml. Missing files fall back to defaults.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the profile API and live displays over HTTP/WebSocket
    Serve {
        /// Port to serve on (overrides folio.toml and FOLIO_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable dev mode (permissive CORS for a local frontend dev server)
        #[arg(long)]
        dev: bool,
    },
    /// List profile sections and their staleness flags
    Groups,
    /// Print a section's display view as JSON
    Show {
        /// Section slug (e.g. contact, social-media), group name, or `profile` for the hub
        group: String,

        /// Print the stored envelope, hidden fields included
        #[arg(long)]
        raw: bool,
    },
    /// Print a section as the dashboard editor sees it
    Dashboard {
        group: String,

        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default folio.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = FolioToml::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    folio::logging::init_tracing(cli.verbose, config.logging.json);

    match &cli.command {
        Commands::Serve { port, dev } => cmd::cmd_serve(config, *port, *dev).await?,
        Commands::Groups => cmd::cmd_groups(&config)?,
        Commands::Show { group, raw } => cmd::cmd_show(&config, group, *raw).await?,
        Commands::Dashboard { group, json } => cmd::cmd_dashboard(&config, group, *json).await?,
        Commands::Config { command } => cmd::cmd_config(&cli.config, &config, command.clone())?,
    }

    Ok(())
}
