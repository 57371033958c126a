//! Shared helper functions used across CLI subcommands.
//!
//! Includes tracing initialization and construction of the intent router
//! from the loaded configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bringskill_adapters::BringClient;
use bringskill_intent::{IntentRouter, ResponseFormatter};

use crate::config::SkillConfig;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
pub fn init_tracing(default_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// Build the Bring client for the configured list.
pub fn bring_client(config: &SkillConfig) -> Result<BringClient> {
    BringClient::new("bring", config.credentials, config.bring.clone())
        .context("failed to create Bring client")
}

/// Build the intent router over the Bring client.
pub fn build_router(config: &SkillConfig) -> Result<IntentRouter> {
    let client = bring_client(config)?;
    let formatter = ResponseFormatter::new(config.skill.locale);
    info!(
        list = %config.credentials.list_uuid,
        locale = ?config.skill.locale,
        remove_mode = ?config.bring.remove_mode,
        "intent router ready"
    );
    Ok(IntentRouter::new(
        Arc::new(client),
        formatter,
        config.intents.clone(),
    ))
}
