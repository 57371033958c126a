//! CLI argument definitions for bringskill.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// bringskill -- voice control for a Bring! shopping list.
#[derive(Parser)]
#[command(
    name = "bringskill",
    version,
    about = "bringskill -- voice control for a Bring! shopping list",
    long_about = "A Rhasspy/Hermes skill that adds, removes, reads and checks items on a \
                  Bring! shopping list and speaks the result back."
)]
pub struct Cli {
    /// Path to the configuration file (default: $BRINGSKILL_CONFIG or ./config.toml).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Connect to the MQTT broker and answer voice intents until interrupted.
    Serve,

    /// Handle a single intent from the command line and print the reply.
    Handle {
        /// Intent name (e.g. `BringAddItem`) or keyword: add, remove, read, query.
        intent: String,
        /// Item names, one argument per item.
        items: Vec<String>,
    },

    /// Show the configuration and check that the shopping list is reachable.
    Status,

    /// Register bringskill as a systemd service.
    Install {
        /// Directory the unit file is written to.
        #[arg(long, default_value = "/etc/systemd/system")]
        unit_dir: PathBuf,

        /// Service name (without `.service`).
        #[arg(long, default_value = "bringskill")]
        name: String,

        /// Also run `systemctl daemon-reload` and `systemctl enable --now`.
        #[arg(long)]
        enable: bool,
    },
}
