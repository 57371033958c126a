//! Skill configuration loaded once at startup.
//!
//! The file is TOML.  Only the `[secret]` section is required; every other
//! section falls back to defaults:
//!
//! ```toml
//! [secret]
//! uuid = "..."            # Bring user UUID
//! bringlistuuid = "..."   # Bring list UUID
//!
//! [skill]
//! install_dir = "/opt/bringskill"
//! locale = "de"
//!
//! [bring]    # see bringskill_adapters::BringConfig
//! [mqtt]     # see bringskill_adapters::HermesConfig
//! [intents]  # see bringskill_intent::IntentNames
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uuid::Uuid;

use bringskill_adapters::{BringConfig, Credentials, HermesConfig};
use bringskill_intent::{IntentNames, Locale};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "BRINGSKILL_CONFIG";

/// Config file used when neither the flag nor the environment names one.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Startup configuration failures.  Both are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file or a required key is absent.
    #[error("configuration missing ({}): {reason}", .path.display())]
    Missing { path: PathBuf, reason: String },

    /// The file exists but cannot be used.
    #[error("invalid configuration ({}): {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// The `[skill]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SkillSection {
    /// Directory the service runs from.
    pub install_dir: PathBuf,
    /// Language of the spoken replies.
    pub locale: Locale,
}

impl Default for SkillSection {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from("/opt/bringskill"),
            locale: Locale::default(),
        }
    }
}

/// Validated configuration.  Read-only after load.
#[derive(Debug, Clone)]
pub struct SkillConfig {
    /// Where the configuration was read from.
    pub path: PathBuf,
    pub credentials: Credentials,
    pub skill: SkillSection,
    pub bring: BringConfig,
    pub mqtt: HermesConfig,
    pub intents: IntentNames,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    secret: RawSecret,
    skill: SkillSection,
    bring: BringConfig,
    mqtt: HermesConfig,
    intents: IntentNames,
}

#[derive(Debug, Default, Deserialize)]
struct RawSecret {
    uuid: Option<String>,
    bringlistuuid: Option<String>,
}

/// Pick the config file: explicit flag, then environment, then default.
pub fn resolve_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Read and validate the configuration file.
pub fn load(path: &Path) -> Result<SkillConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Missing {
        path: path.to_path_buf(),
        reason: format!("cannot read file: {e}"),
    })?;
    parse(&content, path)
}

/// Validate configuration text; `path` is only used in error messages.
pub fn parse(content: &str, path: &Path) -> Result<SkillConfig, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        reason,
    };

    let raw: RawConfig = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;

    let user_uuid = required_uuid(path, "uuid", raw.secret.uuid.as_deref())?;
    let list_uuid = required_uuid(path, "bringlistuuid", raw.secret.bringlistuuid.as_deref())?;

    Ok(SkillConfig {
        path: path.to_path_buf(),
        credentials: Credentials {
            user_uuid,
            list_uuid,
        },
        skill: raw.skill,
        bring: raw.bring,
        mqtt: raw.mqtt,
        intents: raw.intents,
    })
}

fn required_uuid(path: &Path, key: &str, value: Option<&str>) -> Result<Uuid, ConfigError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::Missing {
            path: path.to_path_buf(),
            reason: format!("`secret.{key}` is not set"),
        })?;

    Uuid::parse_str(value).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        reason: format!("`secret.{key}` is not a UUID: {e}"),
    })
}
