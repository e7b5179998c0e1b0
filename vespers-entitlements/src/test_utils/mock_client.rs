//! Scripted billing client.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::{BillingClient, BillingError, CustomerInfo, Package, PurchaseResult};
use async_trait::async_trait;

/// A [`BillingClient`] whose responses are set up front.
///
/// Every method returns a clone of its scripted response and bumps a call
/// counter, so tests can assert that the engine did or did not reach the
/// provider.
pub struct MockBillingClient {
    ready: AtomicBool,
    customer_info: RwLock<Result<CustomerInfo, BillingError>>,
    restore: RwLock<Result<CustomerInfo, BillingError>>,
    purchase: RwLock<Result<CustomerInfo, BillingError>>,
    customer_info_calls: AtomicUsize,
    restore_calls: AtomicUsize,
    purchase_calls: AtomicUsize,
}

impl Default for MockBillingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBillingClient {
    /// A ready client for a customer with no purchases.
    pub fn new() -> Self {
        Self {
            ready: AtomicBool::new(true),
            customer_info: RwLock::new(Ok(CustomerInfo::default())),
            restore: RwLock::new(Ok(CustomerInfo::default())),
            purchase: RwLock::new(Ok(CustomerInfo::default())),
            customer_info_calls: AtomicUsize::new(0),
            restore_calls: AtomicUsize::new(0),
            purchase_calls: AtomicUsize::new(0),
        }
    }

    /// A ready client whose every call returns `info`.
    pub fn with_customer_info(info: CustomerInfo) -> Self {
        let client = Self::new();
        client.set_customer_info(info.clone());
        *client.restore.write().unwrap() = Ok(info.clone());
        *client.purchase.write().unwrap() = Ok(info);
        client
    }

    pub fn not_ready(self) -> Self {
        self.ready.store(false, Ordering::SeqCst);
        self
    }

    pub fn fail_customer_info(self, err: BillingError) -> Self {
        *self.customer_info.write().unwrap() = Err(err);
        self
    }

    pub fn restore_with(self, info: CustomerInfo) -> Self {
        *self.restore.write().unwrap() = Ok(info);
        self
    }

    pub fn fail_restore(self, err: BillingError) -> Self {
        *self.restore.write().unwrap() = Err(err);
        self
    }

    pub fn purchase_with(self, info: CustomerInfo) -> Self {
        *self.purchase.write().unwrap() = Ok(info);
        self
    }

    pub fn fail_purchase(self, err: BillingError) -> Self {
        *self.purchase.write().unwrap() = Err(err);
        self
    }

    /// Replace the snapshot returned by `get_customer_info`.
    pub fn set_customer_info(&self, info: CustomerInfo) {
        *self.customer_info.write().unwrap() = Ok(info);
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn customer_info_calls(&self) -> usize {
        self.customer_info_calls.load(Ordering::SeqCst)
    }

    pub fn restore_calls(&self) -> usize {
        self.restore_calls.load(Ordering::SeqCst)
    }

    pub fn purchase_calls(&self) -> usize {
        self.purchase_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BillingClient for MockBillingClient {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn get_customer_info(&self) -> Result<CustomerInfo, BillingError> {
        self.customer_info_calls.fetch_add(1, Ordering::SeqCst);
        self.customer_info.read().unwrap().clone()
    }

    async fn restore_purchases(&self) -> Result<CustomerInfo, BillingError> {
        self.restore_calls.fetch_add(1, Ordering::SeqCst);
        self.restore.read().unwrap().clone()
    }

    async fn purchase_package(&self, _package: &Package) -> Result<PurchaseResult, BillingError> {
        self.purchase_calls.fetch_add(1, Ordering::SeqCst);
        self.purchase
            .read()
            .unwrap()
            .clone()
            .map(|customer_info| PurchaseResult { customer_info })
    }
}
