//! Subcommand: `bringskill install` -- register the skill as a systemd
//! service that restarts on failure.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::config::SkillConfig;

/// Everything the unit file needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSpec {
    pub description: String,
    pub binary: PathBuf,
    pub config: PathBuf,
    pub working_dir: PathBuf,
}

/// Render a systemd unit for `bringskill serve`.
pub fn render_unit(spec: &UnitSpec) -> String {
    format!(
        "[Unit]\n\
         Description={description}\n\
         Wants=network-online.target\n\
         After=network-online.target\n\
         \n\
         [Service]\n\
         Type=simple\n\
         WorkingDirectory={working_dir}\n\
         ExecStart={binary} serve --config {config}\n\
         Restart=on-failure\n\
         RestartSec=5\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n",
        description = spec.description,
        working_dir = spec.working_dir.display(),
        binary = spec.binary.display(),
        config = spec.config.display(),
    )
}

/// Write the unit file and optionally enable it.
pub async fn cmd_install(
    config: &SkillConfig,
    unit_dir: &Path,
    name: &str,
    enable: bool,
) -> Result<()> {
    let binary = std::env::current_exe().context("cannot locate the bringskill binary")?;
    let config_path = std::fs::canonicalize(&config.path)
        .with_context(|| format!("cannot resolve {}", config.path.display()))?;

    let spec = UnitSpec {
        description: "bringskill voice shopping list".to_string(),
        binary,
        config: config_path,
        working_dir: config.skill.install_dir.clone(),
    };

    let unit_path = unit_dir.join(format!("{name}.service"));
    tokio::fs::write(&unit_path, render_unit(&spec))
        .await
        .with_context(|| format!("failed to write {}", unit_path.display()))?;
    info!(path = %unit_path.display(), "systemd unit written");

    if enable {
        systemctl(&["daemon-reload"]).await?;
        systemctl(&["enable", "--now", &format!("{name}.service")]).await?;
        info!(service = name, "service enabled and started");
    } else {
        println!("Unit written to {}.", unit_path.display());
        println!("Enable it with: sudo systemctl enable --now {name}.service");
    }
    Ok(())
}

async fn systemctl(args: &[&str]) -> Result<()> {
    let status = tokio::process::Command::new("systemctl")
        .args(args)
        .status()
        .await
        .context("failed to run systemctl")?;
    if !status.success() {
        bail!("systemctl {} exited with {status}", args.join(" "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> UnitSpec {
        UnitSpec {
            description: "bringskill voice shopping list".into(),
            binary: PathBuf::from("/opt/bringskill/bringskill"),
            config: PathBuf::from("/opt/bringskill/config.toml"),
            working_dir: PathBuf::from("/opt/bringskill"),
        }
    }

    #[test]
    fn unit_restarts_on_failure() {
        let unit = render_unit(&spec());
        assert!(unit.contains("Restart=on-failure\n"));
        assert!(unit.contains("WantedBy=multi-user.target\n"));
    }

    #[test]
    fn unit_runs_serve_with_config() {
        let unit = render_unit(&spec());
        assert!(unit.contains(
            "ExecStart=/opt/bringskill/bringskill serve --config /opt/bringskill/config.toml\n"
        ));
        assert!(unit.contains("WorkingDirectory=/opt/bringskill\n"));
    }

    #[test]
    fn unit_sections_in_order() {
        let unit = render_unit(&spec());
        let unit_pos = unit.find("[Unit]").unwrap();
        let service_pos = unit.find("[Service]").unwrap();
        let install_pos = unit.find("[Install]").unwrap();
        assert!(unit_pos < service_pos && service_pos < install_pos);
    }
}
