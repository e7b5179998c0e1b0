use crate::classifier::{classify_with, select_active_entitlement};
use crate::{CustomerInfo, SimpleSubscriptionStatus, SubscriptionStatus};

/// Build the detailed status record for a snapshot.
pub fn build_detail(info: &CustomerInfo) -> SubscriptionStatus {
    build_detail_with(info, None)
}

/// Build the detailed status record, using the same entitlement choice as
/// [`classify_with`].
///
/// Without an active entitlement, historical expiry data is not surfaced;
/// only `is_trial` carries over, from a `trial_expired` classification.
pub fn build_detail_with(info: &CustomerInfo, preferred: Option<&str>) -> SubscriptionStatus {
    match select_active_entitlement(info, preferred) {
        Some(entitlement) => SubscriptionStatus {
            is_active: true,
            is_trial: entitlement.is_trial(),
            will_renew: entitlement.will_renew,
            expires_at: entitlement.expiration_date,
            product_identifier: Some(entitlement.product_identifier.clone()),
            entitlement_identifier: Some(entitlement.identifier.clone()),
        },
        None => SubscriptionStatus {
            is_trial: classify_with(info, preferred) == SimpleSubscriptionStatus::TrialExpired,
            ..SubscriptionStatus::inactive()
        },
    }
}
