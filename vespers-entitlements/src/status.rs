use crate::EntitlementError;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse subscription state used for gating decisions.
///
/// Exactly one value per classification. `CancelledButActive` is part of the
/// vocabulary but the classifier folds cancelled-yet-current entitlements
/// into `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleSubscriptionStatus {
    Active,
    TrialActive,
    CancelledButActive,
    Expired,
    TrialExpired,
    NeverSubscribed,
    Unknown,
}

impl SimpleSubscriptionStatus {
    pub const ALL: [SimpleSubscriptionStatus; 7] = [
        SimpleSubscriptionStatus::Active,
        SimpleSubscriptionStatus::TrialActive,
        SimpleSubscriptionStatus::CancelledButActive,
        SimpleSubscriptionStatus::Expired,
        SimpleSubscriptionStatus::TrialExpired,
        SimpleSubscriptionStatus::NeverSubscribed,
        SimpleSubscriptionStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SimpleSubscriptionStatus::Active => "active",
            SimpleSubscriptionStatus::TrialActive => "trial_active",
            SimpleSubscriptionStatus::CancelledButActive => "cancelled_but_active",
            SimpleSubscriptionStatus::Expired => "expired",
            SimpleSubscriptionStatus::TrialExpired => "trial_expired",
            SimpleSubscriptionStatus::NeverSubscribed => "never_subscribed",
            SimpleSubscriptionStatus::Unknown => "unknown",
        }
    }

    /// Whether this status grants access to premium content.
    ///
    /// `Unknown` never grants access.
    pub fn has_access(&self) -> bool {
        matches!(
            self,
            SimpleSubscriptionStatus::Active
                | SimpleSubscriptionStatus::TrialActive
                | SimpleSubscriptionStatus::CancelledButActive
        )
    }
}

impl fmt::Display for SimpleSubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimpleSubscriptionStatus {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| EntitlementError::UnknownStatus(s.to_string()))
    }
}

/// Detailed subscription record for display screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub is_active: bool,
    pub is_trial: bool,
    pub will_renew: bool,
    pub expires_at: Option<DateTime<FixedOffset>>,
    pub product_identifier: Option<String>,
    pub entitlement_identifier: Option<String>,
}

impl SubscriptionStatus {
    /// Record for a customer with no active entitlement.
    pub fn inactive() -> Self {
        Self {
            is_active: false,
            is_trial: false,
            will_renew: false,
            expires_at: None,
            product_identifier: None,
            entitlement_identifier: None,
        }
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        Self::inactive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        for status in SimpleSubscriptionStatus::ALL {
            let parsed: SimpleSubscriptionStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!(
            "Trial-Active".parse::<SimpleSubscriptionStatus>().unwrap(),
            SimpleSubscriptionStatus::TrialActive
        );
        assert!("lapsed".parse::<SimpleSubscriptionStatus>().is_err());

        let json = serde_json::to_string(&SimpleSubscriptionStatus::NeverSubscribed).unwrap();
        assert_eq!(json, "\"never_subscribed\"");
    }

    #[test]
    fn test_has_access() {
        assert!(SimpleSubscriptionStatus::Active.has_access());
        assert!(SimpleSubscriptionStatus::TrialActive.has_access());
        assert!(SimpleSubscriptionStatus::CancelledButActive.has_access());
        assert!(!SimpleSubscriptionStatus::Expired.has_access());
        assert!(!SimpleSubscriptionStatus::TrialExpired.has_access());
        assert!(!SimpleSubscriptionStatus::NeverSubscribed.has_access());
        assert!(!SimpleSubscriptionStatus::Unknown.has_access());
    }

    #[test]
    fn test_inactive_record_serializes_camel_case() {
        let json = serde_json::to_value(SubscriptionStatus::inactive()).unwrap();
        assert_eq!(json["isActive"], false);
        assert!(json["expiresAt"].is_null());
        assert!(json.get("entitlementIdentifier").is_some());
    }
}
