//! Assertion helpers for gating decisions.

use crate::{get_paywall_type, PaywallType, SimpleSubscriptionStatus};

/// Assert that a status opens premium content without a paywall.
///
/// # Panics
/// Panics if the status routes to any paywall.
pub fn assert_grants_access(status: SimpleSubscriptionStatus) {
    assert!(
        status.has_access(),
        "Status {} should grant access",
        status
    );
    assert_eq!(
        get_paywall_type(status),
        PaywallType::None,
        "Status {} should not show a paywall",
        status
    );
}

/// Assert that a status is gated behind a paywall.
///
/// # Panics
/// Panics if the status grants access.
pub fn assert_fails_closed(status: SimpleSubscriptionStatus) {
    assert!(
        !status.has_access(),
        "Status {} must not grant access",
        status
    );
    assert_ne!(
        get_paywall_type(status),
        PaywallType::None,
        "Status {} must show a paywall",
        status
    );
}
