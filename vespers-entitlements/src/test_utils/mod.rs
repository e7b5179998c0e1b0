//! Test utilities for the entitlement engine.
//!
//! - [`CustomerInfoBuilder`] assembles provider snapshots
//! - [`MockBillingClient`] scripts provider responses and counts calls
//! - assertion helpers for paywall routing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vespers_entitlements::test_utils::{CustomerInfoBuilder, MockBillingClient};
//! use vespers_entitlements::{EntitlementService, PeriodType};
//!
//! let info = CustomerInfoBuilder::new().active("premium", PeriodType::Trial).build();
//! let service = EntitlementService::with_defaults(Arc::new(MockBillingClient::with_customer_info(info)));
//! assert_eq!(service.get_simple_subscription_status().await, SimpleSubscriptionStatus::TrialActive);
//! ```

mod assertions;
mod fixtures;
mod mock_client;

pub use assertions::{assert_fails_closed, assert_grants_access};
pub use fixtures::{days_from_now, CustomerInfoBuilder, TestFixtures};
pub use mock_client::MockBillingClient;
