//! Billing provider capability.
//!
//! The engine never talks to a store SDK directly. Hosts implement
//! [`BillingClient`] over their SDK and inject it into
//! [`EntitlementService`](crate::EntitlementService).

use crate::CustomerInfo;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error taxonomy callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Billing client not initialized.
    NotReady,
    /// Network or payload failure reported by the provider.
    ProviderError,
    /// The user aborted a purchase or restore.
    UserCancelled,
    /// A restore that genuinely failed.
    RestoreFailure,
}

/// Errors surfaced by a [`BillingClient`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    #[error("billing client is not ready")]
    NotReady,
    #[error("network error: {0}")]
    Network(String),
    #[error("could not parse provider response: {0}")]
    Parse(String),
    #[error("user cancelled")]
    UserCancelled,
    #[error("store error {code}: {message}")]
    Store { code: i32, message: String },
    #[error("billing error: {0}")]
    Other(String),
}

impl BillingError {
    /// Classify this error for a plain status fetch.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotReady => ErrorKind::NotReady,
            Self::UserCancelled => ErrorKind::UserCancelled,
            Self::Network(_) | Self::Parse(_) | Self::Store { .. } | Self::Other(_) => {
                ErrorKind::ProviderError
            }
        }
    }

    /// Classify this error as the outcome of a restore.
    pub fn restore_kind(&self) -> ErrorKind {
        match self.kind() {
            ErrorKind::ProviderError => ErrorKind::RestoreFailure,
            kind => kind,
        }
    }

    pub fn is_user_cancelled(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }

    /// Returns true if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Store { .. } | Self::NotReady)
    }

    pub fn network<E: std::error::Error>(err: E) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for BillingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A purchasable offering package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub identifier: String,
    pub product_identifier: String,
    /// Provider package type, e.g. `MONTHLY` or `ANNUAL`.
    #[serde(default)]
    pub package_type: Option<String>,
    #[serde(default)]
    pub localized_price: Option<String>,
}

impl Package {
    pub fn new(identifier: impl Into<String>, product_identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            product_identifier: product_identifier.into(),
            package_type: None,
            localized_price: None,
        }
    }

    /// Set package type
    pub fn with_package_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }
}

/// Snapshot returned after a completed purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseResult {
    pub customer_info: CustomerInfo,
}

/// Capability interface over the external billing provider.
///
/// Implementations must be callable concurrently. The engine checks
/// [`is_ready`](BillingClient::is_ready) before any other method.
#[async_trait]
pub trait BillingClient: Send + Sync {
    /// Whether the underlying SDK has been configured.
    fn is_ready(&self) -> bool;

    /// Fetch the current customer snapshot.
    async fn get_customer_info(&self) -> Result<CustomerInfo, BillingError>;

    /// Ask the store to re-sync prior purchases and return the new snapshot.
    async fn restore_purchases(&self) -> Result<CustomerInfo, BillingError>;

    /// Run the store purchase flow for `package`.
    ///
    /// A user abort must be reported as [`BillingError::UserCancelled`].
    async fn purchase_package(&self, package: &Package) -> Result<PurchaseResult, BillingError>;
}
