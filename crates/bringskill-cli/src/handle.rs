//! Subcommands: `bringskill handle` and `bringskill status`.

use anyhow::{Context, Result};

use bringskill_adapters::{HealthStatus, ShoppingList};
use bringskill_intent::VoiceIntent;

use crate::config::SkillConfig;
use crate::helpers::{bring_client, build_router};

/// Run one intent and print the spoken reply.
pub async fn cmd_handle(config: &SkillConfig, intent: &str, items: &[String]) -> Result<()> {
    let router = build_router(config)?;
    let kind = router
        .names()
        .resolve(intent)
        .context("unknown intent")?;

    let response = router.route(&VoiceIntent::new(kind, items)).await;
    println!("{}", response.text);
    Ok(())
}

/// Print the configuration summary and the list's reachability.
pub async fn cmd_status(config: &SkillConfig) -> Result<()> {
    let client = bring_client(config)?;

    println!();
    println!("  bringskill v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("  Config:      {}", config.path.display());
    println!("  Install dir: {}", config.skill.install_dir.display());
    println!("  Locale:      {:?}", config.skill.locale);
    println!("  List:        {}", config.credentials.list_uuid);
    println!("  Bring API:   {}", config.bring.base_url);
    println!("  MQTT:        {}:{}", config.mqtt.host, config.mqtt.port);
    println!("  Intents:     {}", config.intents.all().join(", "));

    let health = client.health_check().await?;
    println!("  Vendor:      {health}");
    if health == HealthStatus::Healthy {
        let items = client.list_items().await?;
        println!("  Items:       {}", items.len());
    }
    println!();
    Ok(())
}
