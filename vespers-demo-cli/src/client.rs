//! File-backed billing client
//!
//! Stands in for the store SDK: every call re-reads a CustomerInfo JSON
//! snapshot from disk, so edits to the file show up on the next command.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use vespers_entitlements::{BillingClient, BillingError, CustomerInfo, Package, PurchaseResult};

pub struct FileBillingClient {
    path: PathBuf,
    ready: bool,
    restore_failure: Option<BillingError>,
    purchase_failure: Option<BillingError>,
}

impl FileBillingClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ready: true,
            restore_failure: None,
            purchase_failure: None,
        }
    }

    /// Simulate an SDK that was never configured
    pub fn with_ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    /// Make restore calls fail with `err`
    pub fn with_restore_failure(mut self, err: BillingError) -> Self {
        self.restore_failure = Some(err);
        self
    }

    /// Make purchase calls fail with `err`
    pub fn with_purchase_failure(mut self, err: BillingError) -> Self {
        self.purchase_failure = Some(err);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<CustomerInfo, BillingError> {
        tracing::debug!("Reading customer info from {}", self.path.display());
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(BillingError::network)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[async_trait]
impl BillingClient for FileBillingClient {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn get_customer_info(&self) -> Result<CustomerInfo, BillingError> {
        self.load().await
    }

    async fn restore_purchases(&self) -> Result<CustomerInfo, BillingError> {
        if let Some(err) = &self.restore_failure {
            return Err(err.clone());
        }
        self.load().await
    }

    async fn purchase_package(&self, package: &Package) -> Result<PurchaseResult, BillingError> {
        if let Some(err) = &self.purchase_failure {
            return Err(err.clone());
        }
        tracing::debug!("Simulating purchase of {}", package.product_identifier);
        let customer_info = self.load().await?;
        Ok(PurchaseResult { customer_info })
    }
}
