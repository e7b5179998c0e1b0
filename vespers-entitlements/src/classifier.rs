//! Snapshot classification.
//!
//! [`classify`] is a pure, total function: the same snapshot always yields
//! the same status and nothing is logged or stored. Rules, first match wins:
//!
//! 1. Any active entitlement: `trial_active` if the chosen one is a trial,
//!    otherwise `active`. Cancelled entitlements still inside their billing
//!    period are reported as `active`.
//! 2. No purchase history: `never_subscribed`, even if historical
//!    entitlements are present.
//! 3. Purchase history: `trial_expired` if the first historical entitlement
//!    was a trial, otherwise `expired`.
//!
//! "First" means the configured preferred entitlement when it is present,
//! else the lexicographically smallest entitlement id.

use crate::{CustomerInfo, EntitlementInfo, SimpleSubscriptionStatus};
use std::collections::BTreeMap;

/// Classify a snapshot using lexicographic entitlement order.
pub fn classify(info: &CustomerInfo) -> SimpleSubscriptionStatus {
    classify_with(info, None)
}

/// Classify a snapshot, preferring `preferred` when several entitlements qualify.
pub fn classify_with(info: &CustomerInfo, preferred: Option<&str>) -> SimpleSubscriptionStatus {
    if let Some(entitlement) = select_active_entitlement(info, preferred) {
        return if entitlement.is_trial() {
            SimpleSubscriptionStatus::TrialActive
        } else {
            SimpleSubscriptionStatus::Active
        };
    }

    if !info.has_purchase_history() {
        // Historical entitlements without any purchase should not happen.
        return SimpleSubscriptionStatus::NeverSubscribed;
    }

    match select_historical_entitlement(info, preferred) {
        Some(entitlement) if entitlement.is_trial() => SimpleSubscriptionStatus::TrialExpired,
        _ => SimpleSubscriptionStatus::Expired,
    }
}

/// The active entitlement a status is derived from, if any.
pub fn select_active_entitlement<'a>(
    info: &'a CustomerInfo,
    preferred: Option<&str>,
) -> Option<&'a EntitlementInfo> {
    select(&info.entitlements.active, preferred)
}

/// The historical entitlement inspected once nothing is active.
pub fn select_historical_entitlement<'a>(
    info: &'a CustomerInfo,
    preferred: Option<&str>,
) -> Option<&'a EntitlementInfo> {
    select(&info.entitlements.all, preferred)
}

fn select<'a>(
    entitlements: &'a BTreeMap<String, EntitlementInfo>,
    preferred: Option<&str>,
) -> Option<&'a EntitlementInfo> {
    preferred
        .and_then(|id| entitlements.get(id))
        .or_else(|| entitlements.values().next())
}
