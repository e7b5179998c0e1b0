//! # Vespers Entitlements
//!
//! Resolves subscription entitlements from a billing provider snapshot and
//! routes the result to a paywall decision.
//!
//! ## Model
//! - A [`CustomerInfo`] snapshot comes from the billing provider through an
//!   injected [`BillingClient`].
//! - [`classify`] maps the snapshot to one of seven
//!   [`SimpleSubscriptionStatus`] values. It is pure and never fails.
//! - [`get_paywall_type`] maps a status to a [`PaywallType`]. Unknown states
//!   fail closed to the payment paywall.
//! - [`EntitlementService`] wires the two together. Provider failures are
//!   logged and mapped to `unknown`, never returned to the caller.
//!
//! Nothing is cached or persisted. Every call reflects exactly one provider
//! round trip.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vespers_entitlements::{EngineConfig, EntitlementService, PaywallType};
//!
//! let service = EntitlementService::new(Arc::new(my_billing_client), EngineConfig::default());
//! let status = service.get_simple_subscription_status().await;
//! if service.get_paywall_type(status) != PaywallType::None {
//!     // show the paywall
//! }
//! ```

pub mod billing;
pub mod classifier;
pub mod config;
pub mod customer_info;
pub mod detail;
pub mod expiry;
pub mod paywall;
pub mod service;
pub mod status;

/// Test utilities: scripted billing client and snapshot fixtures.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use billing::{BillingClient, BillingError, ErrorKind, Package, PurchaseResult};
pub use classifier::{classify, classify_with};
pub use config::{EngineConfig, MAX_EXPIRING_SOON_DAYS};
pub use customer_info::{CustomerInfo, EntitlementInfo, EntitlementInfos, PeriodType};
pub use detail::{build_detail, build_detail_with};
pub use expiry::{
    format_expiry_date, is_expiring_soon, is_expiring_soon_at, status_text,
    DEFAULT_EXPIRING_SOON_DAYS,
};
pub use paywall::{get_paywall_type, should_show_paywall, PaywallType};
pub use service::{EntitlementService, PurchaseOutcome, RestoreFeedback, RestoreResult};
pub use status::{SimpleSubscriptionStatus, SubscriptionStatus};

pub type Result<T> = std::result::Result<T, EntitlementError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EntitlementError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unknown subscription status: {0}")]
    UnknownStatus(String),
    #[error("unknown paywall type: {0}")]
    UnknownPaywall(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EntitlementError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
