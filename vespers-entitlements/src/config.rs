//! Engine configuration.

use crate::{EntitlementError, Result, DEFAULT_EXPIRING_SOON_DAYS};
use serde::{Deserialize, Serialize};

/// Tunables for [`EntitlementService`](crate::EntitlementService).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Days before expiry at which the UI warns about an upcoming expiry.
    #[serde(default = "default_threshold_days")]
    pub expiring_soon_threshold_days: i64,

    /// Entitlement that wins when several are active at once.
    #[serde(default)]
    pub preferred_entitlement: Option<String>,
}

/// Largest accepted expiring-soon threshold, in days.
pub const MAX_EXPIRING_SOON_DAYS: i64 = 3650;

fn default_threshold_days() -> i64 {
    DEFAULT_EXPIRING_SOON_DAYS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            expiring_soon_threshold_days: default_threshold_days(),
            preferred_entitlement: None,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expiring-soon threshold.
    pub fn with_expiring_soon_threshold_days(mut self, days: i64) -> Self {
        self.expiring_soon_threshold_days = days;
        self
    }

    /// Set the preferred entitlement id.
    pub fn with_preferred_entitlement(mut self, entitlement: impl Into<String>) -> Self {
        self.preferred_entitlement = Some(entitlement.into());
        self
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.expiring_soon_threshold_days < 0 {
            return Err(EntitlementError::InvalidConfig(
                "expiring_soon_threshold_days cannot be negative".to_string(),
            ));
        }
        if self.expiring_soon_threshold_days > MAX_EXPIRING_SOON_DAYS {
            return Err(EntitlementError::InvalidConfig(format!(
                "expiring_soon_threshold_days cannot exceed {}",
                MAX_EXPIRING_SOON_DAYS
            )));
        }
        if self
            .preferred_entitlement
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            return Err(EntitlementError::InvalidConfig(
                "preferred_entitlement cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.expiring_soon_threshold_days, 3);
        assert_eq!(config.preferred_entitlement, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{"preferred_entitlement": "premium"}"#).unwrap();
        assert_eq!(config.expiring_soon_threshold_days, 3);
        assert_eq!(config.preferred_entitlement.as_deref(), Some("premium"));

        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_validation() {
        let config = EngineConfig::new().with_expiring_soon_threshold_days(-1);
        assert!(matches!(
            config.validate(),
            Err(EntitlementError::InvalidConfig(_))
        ));

        let config = EngineConfig::new().with_preferred_entitlement("  ");
        assert!(config.validate().is_err());

        assert!(EngineConfig::from_json(r#"{"expiring_soon_threshold_days": -2}"#).is_err());
        assert!(matches!(
            EngineConfig::from_json(r#"{"expiring_soon_threshold_days": 1000000000000000}"#),
            Err(EntitlementError::InvalidConfig(_))
        ));
        assert!(EngineConfig::new()
            .with_expiring_soon_threshold_days(MAX_EXPIRING_SOON_DAYS)
            .validate()
            .is_ok());
        assert!(EngineConfig::new()
            .with_expiring_soon_threshold_days(MAX_EXPIRING_SOON_DAYS + 1)
            .validate()
            .is_err());
        assert!(matches!(
            EngineConfig::from_json("[]"),
            Err(EntitlementError::Serialization(_))
        ));
    }
}
