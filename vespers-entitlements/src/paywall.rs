//! Paywall routing.
//!
//! Maps a [`SimpleSubscriptionStatus`] to the paywall the UI must render.
//! Routing fails closed: a status that cannot be trusted (`unknown`) gets the
//! payment paywall rather than access.

use crate::{EntitlementError, SimpleSubscriptionStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which paywall, if any, gates premium content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaywallType {
    /// First purchase paywall.
    Payment,
    /// Win-back paywall for lapsed subscribers.
    Renewal,
    /// No paywall; access granted.
    None,
}

impl PaywallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaywallType::Payment => "payment",
            PaywallType::Renewal => "renewal",
            PaywallType::None => "none",
        }
    }
}

impl fmt::Display for PaywallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaywallType {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "payment" => Ok(PaywallType::Payment),
            "renewal" => Ok(PaywallType::Renewal),
            "none" => Ok(PaywallType::None),
            _ => Err(EntitlementError::UnknownPaywall(s.to_string())),
        }
    }
}

/// Route a status to a paywall.
pub fn get_paywall_type(status: SimpleSubscriptionStatus) -> PaywallType {
    match status {
        SimpleSubscriptionStatus::NeverSubscribed => PaywallType::Payment,
        SimpleSubscriptionStatus::Expired | SimpleSubscriptionStatus::TrialExpired => {
            PaywallType::Renewal
        }
        SimpleSubscriptionStatus::Unknown => PaywallType::Payment,
        SimpleSubscriptionStatus::Active
        | SimpleSubscriptionStatus::TrialActive
        | SimpleSubscriptionStatus::CancelledButActive => PaywallType::None,
    }
}

pub fn should_show_paywall(status: SimpleSubscriptionStatus) -> bool {
    get_paywall_type(status) != PaywallType::None
}
