//! Snapshot fixtures.

use crate::{CustomerInfo, EntitlementInfo, PeriodType};
use chrono::{DateTime, Duration, FixedOffset, Utc};

/// Commonly used identifiers.
pub struct TestFixtures;

impl TestFixtures {
    pub const ENTITLEMENT: &'static str = "premium";
    pub const MONTHLY_PRODUCT: &'static str = "vespers_monthly";
    pub const ANNUAL_PRODUCT: &'static str = "vespers_annual";

    /// Provider JSON for a renewing annual subscriber expiring 2024-12-31.
    pub const ACTIVE_ANNUAL_JSON: &'static str = r#"{
        "entitlements": {
            "active": {
                "premium": {
                    "periodType": "NORMAL",
                    "willRenew": true,
                    "expirationDate": "2024-12-31",
                    "productIdentifier": "vespers_annual"
                }
            },
            "all": {
                "premium": {
                    "periodType": "NORMAL",
                    "willRenew": true,
                    "expirationDate": "2024-12-31",
                    "productIdentifier": "vespers_annual"
                }
            }
        },
        "allPurchasedProductIdentifiers": ["vespers_annual"],
        "activeSubscriptions": ["vespers_annual"]
    }"#;

    /// Customer whose only subscription was an expired trial.
    pub fn trial_expired() -> CustomerInfo {
        CustomerInfoBuilder::new()
            .purchased(Self::MONTHLY_PRODUCT)
            .historical(Self::ENTITLEMENT, PeriodType::Trial)
            .build()
    }

    /// Customer who let a paid subscription lapse.
    pub fn expired() -> CustomerInfo {
        CustomerInfoBuilder::new()
            .purchased(Self::MONTHLY_PRODUCT)
            .historical(Self::ENTITLEMENT, PeriodType::Normal)
            .build()
    }

    /// Renewing subscriber.
    pub fn active() -> CustomerInfo {
        CustomerInfoBuilder::new()
            .active_entitlement(
                EntitlementInfo::new(Self::ENTITLEMENT, PeriodType::Normal, Self::MONTHLY_PRODUCT)
                    .with_will_renew(true)
                    .with_expiration_date(days_from_now(30))
                    .with_store("APP_STORE"),
            )
            .build()
    }
}

/// A date `days` from now, in UTC.
pub fn days_from_now(days: i64) -> DateTime<FixedOffset> {
    (Utc::now() + Duration::days(days)).fixed_offset()
}

/// Builder for [`CustomerInfo`] snapshots.
///
/// Active entitlements are also recorded under `all` and in the purchase
/// history, matching what providers report.
#[derive(Default)]
pub struct CustomerInfoBuilder {
    info: CustomerInfo,
}

impl CustomerInfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an active entitlement with a generated product id.
    pub fn active(self, identifier: &str, period_type: PeriodType) -> Self {
        let product = format!("{}_product", identifier);
        self.active_entitlement(EntitlementInfo::new(identifier, period_type, product))
    }

    pub fn active_entitlement(mut self, entitlement: EntitlementInfo) -> Self {
        let product = entitlement.product_identifier.clone();
        if !self.info.all_purchased_product_identifiers.contains(&product) {
            self.info.all_purchased_product_identifiers.push(product.clone());
        }
        self.info.active_subscriptions.insert(product);
        self.info
            .entitlements
            .all
            .insert(entitlement.identifier.clone(), entitlement.clone());
        self.info
            .entitlements
            .active
            .insert(entitlement.identifier.clone(), entitlement);
        self
    }

    /// Add a historical (inactive) entitlement. Does not touch purchase history.
    pub fn historical(self, identifier: &str, period_type: PeriodType) -> Self {
        let product = format!("{}_product", identifier);
        self.historical_entitlement(EntitlementInfo::new(identifier, period_type, product))
    }

    pub fn historical_entitlement(mut self, entitlement: EntitlementInfo) -> Self {
        self.info
            .entitlements
            .all
            .insert(entitlement.identifier.clone(), entitlement);
        self
    }

    /// Record a purchased product id.
    pub fn purchased(mut self, product: &str) -> Self {
        self.info
            .all_purchased_product_identifiers
            .push(product.to_string());
        self
    }

    pub fn build(self) -> CustomerInfo {
        self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, SimpleSubscriptionStatus};

    #[test]
    fn test_builder_mirrors_provider_shape() {
        let info = CustomerInfoBuilder::new()
            .active("premium", PeriodType::Normal)
            .build();
        assert!(info.entitlements.all.contains_key("premium"));
        assert_eq!(info.all_purchased_product_identifiers, vec!["premium_product"]);
        assert!(info.active_subscriptions.contains("premium_product"));
    }

    #[test]
    fn test_fixture_json_parses() {
        let info = CustomerInfo::from_json(TestFixtures::ACTIVE_ANNUAL_JSON).unwrap();
        assert_eq!(classify(&info), SimpleSubscriptionStatus::Active);
        assert_eq!(classify(&TestFixtures::expired()), SimpleSubscriptionStatus::Expired);
        assert_eq!(
            classify(&TestFixtures::trial_expired()),
            SimpleSubscriptionStatus::TrialExpired
        );
        assert_eq!(classify(&TestFixtures::active()), SimpleSubscriptionStatus::Active);

        let active = TestFixtures::active();
        let premium = &active.entitlements.active[TestFixtures::ENTITLEMENT];
        assert_eq!(premium.store.as_deref(), Some("APP_STORE"));
    }
}
