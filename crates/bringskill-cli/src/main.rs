//! CLI entry point for bringskill.
//!
//! This binary provides the `bringskill` command with subcommands for
//! serving voice intents over Hermes, handling a single intent from the
//! shell, checking the configuration, and installing the systemd service.

mod cli;
mod config;
mod handle;
mod helpers;
mod install;
mod serve;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::helpers::init_tracing;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the config path may come from elsewhere.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing("info", cli.json_logs);

    let config_path = config::resolve_path(cli.config);
    let config = config::load(&config_path).context("failed to load configuration")?;
    info!(path = %config.path.display(), "configuration loaded");

    match cli.command {
        Commands::Serve => serve::cmd_serve(&config).await,
        Commands::Handle { intent, items } => handle::cmd_handle(&config, &intent, &items).await,
        Commands::Status => handle::cmd_status(&config).await,
        Commands::Install {
            unit_dir,
            name,
            enable,
        } => install::cmd_install(&config, &unit_dir, &name, enable).await,
    }
}
