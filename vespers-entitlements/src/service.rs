//! Entitlement service: the surface screens call.
//!
//! Every method is a single round trip to the injected [`BillingClient`].
//! Status lookups never fail: a client that is not ready or a provider error
//! resolves to `unknown` (or an inactive record), which routes to the
//! payment paywall.

use crate::classifier::classify_with;
use crate::detail::build_detail_with;
use crate::{
    expiry, get_paywall_type, BillingClient, BillingError, CustomerInfo, EngineConfig, ErrorKind,
    Package, PaywallType, SimpleSubscriptionStatus, SubscriptionStatus,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of a restore-purchases round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResult {
    pub success: bool,
    pub has_active_subscription: bool,
    /// The user aborted the restore; not an error.
    #[serde(default)]
    pub cancelled: bool,
}

impl RestoreResult {
    pub fn restored(has_active_subscription: bool) -> Self {
        Self {
            success: true,
            has_active_subscription,
            cancelled: false,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            has_active_subscription: false,
            cancelled: false,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::failed()
        }
    }

    /// What the UI should tell the user.
    pub fn feedback(&self) -> RestoreFeedback {
        match (self.success, self.has_active_subscription, self.cancelled) {
            (true, true, _) => RestoreFeedback::Restored,
            (true, false, _) => RestoreFeedback::NothingToRestore,
            (false, _, true) => RestoreFeedback::Cancelled,
            (false, _, false) => RestoreFeedback::Failed,
        }
    }
}

/// User-facing interpretation of a [`RestoreResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreFeedback {
    Restored,
    NothingToRestore,
    Cancelled,
    Failed,
}

impl RestoreFeedback {
    pub fn message(&self) -> &'static str {
        match self {
            RestoreFeedback::Restored => "Your subscription has been restored.",
            RestoreFeedback::NothingToRestore => {
                "No active subscription was found for this account."
            }
            RestoreFeedback::Cancelled => "Restore cancelled.",
            RestoreFeedback::Failed => "We couldn't restore your purchases. Please try again.",
        }
    }

    /// Whether the UI should offer a retry button.
    pub fn offers_retry(&self) -> bool {
        matches!(self, RestoreFeedback::Failed)
    }

    /// Cancelled restores are silent.
    pub fn is_silent(&self) -> bool {
        matches!(self, RestoreFeedback::Cancelled)
    }
}

/// Outcome of a purchase flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    Purchased { status: SimpleSubscriptionStatus },
    Cancelled,
    Failed { kind: ErrorKind, message: String },
}

impl PurchaseOutcome {
    pub fn grants_access(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased { status } if status.has_access())
    }
}

/// Resolves entitlements through an injected billing client.
#[derive(Clone)]
pub struct EntitlementService {
    client: Arc<dyn BillingClient>,
    config: EngineConfig,
}

impl EntitlementService {
    pub fn new(client: Arc<dyn BillingClient>, config: EngineConfig) -> Self {
        Self { client, config }
    }

    /// Create with default config
    pub fn with_defaults(client: Arc<dyn BillingClient>) -> Self {
        Self::new(client, EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn client(&self) -> &Arc<dyn BillingClient> {
        &self.client
    }

    fn preferred(&self) -> Option<&str> {
        self.config.preferred_entitlement.as_deref()
    }

    async fn fetch_customer_info(&self) -> Result<CustomerInfo, BillingError> {
        if !self.client.is_ready() {
            return Err(BillingError::NotReady);
        }
        self.client.get_customer_info().await
    }

    /// Current coarse status. Never fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_simple_subscription_status(&self) -> SimpleSubscriptionStatus {
        match self.fetch_customer_info().await {
            Ok(info) => {
                let status = classify_with(&info, self.preferred());
                tracing::debug!(status = %status, "classified customer info");
                status
            }
            Err(e) => {
                log_fetch_failure(&e);
                SimpleSubscriptionStatus::Unknown
            }
        }
    }

    /// Current detailed status. Never fails; errors yield an inactive record.
    #[tracing::instrument(skip(self))]
    pub async fn get_subscription_status(&self) -> SubscriptionStatus {
        match self.fetch_customer_info().await {
            Ok(info) => build_detail_with(&info, self.preferred()),
            Err(e) => {
                log_fetch_failure(&e);
                SubscriptionStatus::inactive()
            }
        }
    }

    /// Re-sync prior purchases and report whether access came back.
    #[tracing::instrument(skip(self))]
    pub async fn restore_purchases(&self) -> RestoreResult {
        if !self.client.is_ready() {
            tracing::warn!("restore requested before billing client was ready");
            return RestoreResult::failed();
        }

        match self.client.restore_purchases().await {
            Ok(info) => {
                let status = classify_with(&info, self.preferred());
                let has_active = status.has_access();
                tracing::info!(status = %status, has_active, "purchases restored");
                RestoreResult::restored(has_active)
            }
            Err(e) if e.is_user_cancelled() => {
                tracing::info!("restore cancelled by user");
                RestoreResult::cancelled()
            }
            Err(e) => {
                tracing::error!(error = %e, kind = ?e.restore_kind(), "restore failed");
                RestoreResult::failed()
            }
        }
    }

    /// Run a purchase and classify the resulting snapshot.
    #[tracing::instrument(skip(self, package), fields(package = %package.identifier))]
    pub async fn purchase_package(&self, package: &Package) -> PurchaseOutcome {
        if !self.client.is_ready() {
            tracing::warn!("purchase requested before billing client was ready");
            return PurchaseOutcome::Failed {
                kind: ErrorKind::NotReady,
                message: BillingError::NotReady.to_string(),
            };
        }

        match self.client.purchase_package(package).await {
            Ok(result) => {
                let status = classify_with(&result.customer_info, self.preferred());
                tracing::info!(status = %status, "purchase completed");
                PurchaseOutcome::Purchased { status }
            }
            Err(e) if e.is_user_cancelled() => {
                tracing::info!("purchase cancelled by user");
                PurchaseOutcome::Cancelled
            }
            Err(e) => {
                tracing::error!(error = %e, "purchase failed");
                PurchaseOutcome::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                }
            }
        }
    }

    pub fn get_paywall_type(&self, status: SimpleSubscriptionStatus) -> PaywallType {
        get_paywall_type(status)
    }

    /// Expiring-soon check using the configured threshold.
    pub fn is_subscription_expiring_soon(&self, expires_at: Option<&DateTime<FixedOffset>>) -> bool {
        expiry::is_expiring_soon(expires_at, self.config.expiring_soon_threshold_days)
    }

    pub fn format_expiry_date(&self, date: &DateTime<FixedOffset>) -> String {
        expiry::format_expiry_date(date)
    }

    pub fn get_subscription_status_text(&self, detail: &SubscriptionStatus) -> String {
        expiry::status_text(detail)
    }
}

fn log_fetch_failure(err: &BillingError) {
    match err.kind() {
        ErrorKind::NotReady => {
            tracing::warn!("billing client not ready, reporting unknown status")
        }
        kind => tracing::error!(error = %err, kind = ?kind, "failed to fetch customer info"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CustomerInfoBuilder, MockBillingClient};
    use crate::PeriodType;

    fn service(client: MockBillingClient) -> (EntitlementService, Arc<MockBillingClient>) {
        let client = Arc::new(client);
        (EntitlementService::with_defaults(client.clone()), client)
    }

    #[tokio::test]
    async fn test_active_status() {
        let info = CustomerInfoBuilder::new()
            .active("premium", PeriodType::Normal)
            .build();
        let (service, _) = service(MockBillingClient::with_customer_info(info));
        assert_eq!(
            service.get_simple_subscription_status().await,
            SimpleSubscriptionStatus::Active
        );
    }

    #[tokio::test]
    async fn test_not_ready_short_circuits() {
        let (service, client) = service(MockBillingClient::new().not_ready());

        assert_eq!(
            service.get_simple_subscription_status().await,
            SimpleSubscriptionStatus::Unknown
        );
        assert_eq!(
            service.get_subscription_status().await,
            SubscriptionStatus::inactive()
        );
        assert_eq!(service.restore_purchases().await, RestoreResult::failed());
        assert_eq!(client.customer_info_calls(), 0);
        assert_eq!(client.restore_calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_is_unknown() {
        let (service, client) = service(
            MockBillingClient::new()
                .fail_customer_info(BillingError::Network("timeout".to_string())),
        );
        let status = service.get_simple_subscription_status().await;
        assert_eq!(status, SimpleSubscriptionStatus::Unknown);
        assert_eq!(service.get_paywall_type(status), PaywallType::Payment);
        assert_eq!(client.customer_info_calls(), 1);
    }

    #[tokio::test]
    async fn test_restore_scenarios() {
        let active = CustomerInfoBuilder::new()
            .active("premium", PeriodType::Normal)
            .build();
        let (svc, _) = service(MockBillingClient::new().restore_with(active));
        let result = svc.restore_purchases().await;
        assert!(result.success && result.has_active_subscription);
        assert_eq!(result.feedback(), RestoreFeedback::Restored);

        let (svc, _) = service(MockBillingClient::new().restore_with(CustomerInfo::default()));
        let result = svc.restore_purchases().await;
        assert_eq!(result, RestoreResult::restored(false));
        assert_eq!(result.feedback(), RestoreFeedback::NothingToRestore);

        let (svc, _) = service(
            MockBillingClient::new().fail_restore(BillingError::Network("offline".to_string())),
        );
        let result = svc.restore_purchases().await;
        assert!(!result.success && !result.has_active_subscription);
        assert!(result.feedback().offers_retry());

        let (svc, _) = service(MockBillingClient::new().fail_restore(BillingError::UserCancelled));
        let result = svc.restore_purchases().await;
        assert!(!result.success);
        assert!(result.feedback().is_silent());
    }

    #[tokio::test]
    async fn test_purchase_outcomes() {
        let package = Package::new("$rc_annual", "vespers_annual");
        let trial = CustomerInfoBuilder::new()
            .active("premium", PeriodType::Trial)
            .build();
        let (svc, _) = service(MockBillingClient::new().purchase_with(trial));
        let outcome = svc.purchase_package(&package).await;
        assert_eq!(
            outcome,
            PurchaseOutcome::Purchased {
                status: SimpleSubscriptionStatus::TrialActive
            }
        );
        assert!(outcome.grants_access());

        let (svc, _) = service(MockBillingClient::new().fail_purchase(BillingError::UserCancelled));
        assert_eq!(svc.purchase_package(&package).await, PurchaseOutcome::Cancelled);

        let (svc, _) = service(MockBillingClient::new().fail_purchase(BillingError::Store {
            code: 3,
            message: "purchase not allowed".to_string(),
        }));
        match svc.purchase_package(&package).await {
            PurchaseOutcome::Failed { kind, .. } => assert_eq!(kind, ErrorKind::ProviderError),
            other => panic!("unexpected outcome: {:?}", other),
        }

        let (svc, client) = service(MockBillingClient::new().not_ready());
        assert!(matches!(
            svc.purchase_package(&package).await,
            PurchaseOutcome::Failed {
                kind: ErrorKind::NotReady,
                ..
            }
        ));
        assert_eq!(client.purchase_calls(), 0);
    }

    #[tokio::test]
    async fn test_preferred_entitlement_from_config() {
        let info = CustomerInfoBuilder::new()
            .active("advent", PeriodType::Trial)
            .active("premium", PeriodType::Normal)
            .build();
        let client = Arc::new(MockBillingClient::with_customer_info(info));
        let svc = EntitlementService::new(
            client,
            EngineConfig::new().with_preferred_entitlement("premium"),
        );
        assert_eq!(
            svc.get_simple_subscription_status().await,
            SimpleSubscriptionStatus::Active
        );
        let detail = svc.get_subscription_status().await;
        assert_eq!(detail.entitlement_identifier.as_deref(), Some("premium"));
    }

    #[test]
    fn test_restore_result_serialization() {
        let json = serde_json::to_value(RestoreResult::restored(true)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["hasActiveSubscription"], true);
    }
}
