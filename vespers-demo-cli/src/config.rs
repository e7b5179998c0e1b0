//! Engine config loading for the CLI
//!
//! Precedence: `--config <file>`, then `<config dir>/vespers-demo/config.json`
//! if it exists, then defaults. Environment variables override the result.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use vespers_entitlements::EngineConfig;

pub const THRESHOLD_ENV: &str = "VESPERS_EXPIRY_THRESHOLD_DAYS";
pub const PREFERRED_ENV: &str = "VESPERS_PREFERRED_ENTITLEMENT";

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vespers-demo").join("config.json"))
}

pub fn load(explicit: Option<&Path>) -> Result<EngineConfig> {
    let mut config = match explicit {
        Some(path) => read_file(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => read_file(&path)?,
            None => EngineConfig::default(),
        },
    };

    if let Ok(days) = std::env::var(THRESHOLD_ENV) {
        config.expiring_soon_threshold_days = days.trim().parse().map_err(|_| {
            anyhow!(
                "{} must be a whole number of days, got {:?}",
                THRESHOLD_ENV,
                days
            )
        })?;
    }
    if let Ok(entitlement) = std::env::var(PREFERRED_ENV) {
        config.preferred_entitlement = Some(entitlement);
    }

    config.validate()?;
    tracing::debug!(?config, "Loaded engine config");
    Ok(config)
}

fn read_file(path: &Path) -> Result<EngineConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    EngineConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}
