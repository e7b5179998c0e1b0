//! Billing provider snapshot types.
//!
//! A [`CustomerInfo`] is the point-in-time entitlement and purchase-history
//! payload returned by the billing provider. The engine only reads it.
//! Deserialization accepts the provider's camelCase JSON and treats every
//! absent collection as empty.

use crate::{EntitlementError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Billing period of an entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PeriodType {
    #[default]
    Normal,
    Trial,
    Intro,
    Prepaid,
    /// Any period type this engine does not know about.
    Unknown,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Normal => "NORMAL",
            PeriodType::Trial => "TRIAL",
            PeriodType::Intro => "INTRO",
            PeriodType::Prepaid => "PREPAID",
            PeriodType::Unknown => "UNKNOWN",
        }
    }

    pub fn is_trial(&self) -> bool {
        matches!(self, PeriodType::Trial)
    }
}

impl From<String> for PeriodType {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "NORMAL" => PeriodType::Normal,
            "TRIAL" => PeriodType::Trial,
            "INTRO" => PeriodType::Intro,
            "PREPAID" => PeriodType::Prepaid,
            _ => PeriodType::Unknown,
        }
    }
}

impl From<PeriodType> for String {
    fn from(value: PeriodType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entitlement grant as reported by the billing provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementInfo {
    /// Entitlement id. Filled from the map key when the payload omits it.
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub period_type: PeriodType,
    #[serde(default)]
    pub will_renew: bool,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub expiration_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub product_identifier: String,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub latest_purchase_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub original_purchase_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub is_sandbox: bool,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub unsubscribe_detected_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub billing_issue_detected_at: Option<DateTime<FixedOffset>>,
}

impl EntitlementInfo {
    /// Create an entitlement with the given id, period type and product.
    pub fn new(
        identifier: impl Into<String>,
        period_type: PeriodType,
        product_identifier: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            period_type,
            will_renew: false,
            expiration_date: None,
            product_identifier: product_identifier.into(),
            is_active: None,
            latest_purchase_date: None,
            original_purchase_date: None,
            store: None,
            is_sandbox: false,
            unsubscribe_detected_at: None,
            billing_issue_detected_at: None,
        }
    }

    /// Set whether the entitlement renews at the end of the period
    pub fn with_will_renew(mut self, will_renew: bool) -> Self {
        self.will_renew = will_renew;
        self
    }

    /// Set expiration date
    pub fn with_expiration_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.expiration_date = Some(date);
        self
    }

    /// Set store name
    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn is_trial(&self) -> bool {
        self.period_type.is_trial()
    }
}

/// Active and historical entitlements keyed by entitlement id.
///
/// Keys iterate in lexicographic order, so "the first entitlement" is always
/// the same entry for the same snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEntitlementInfos")]
pub struct EntitlementInfos {
    pub active: BTreeMap<String, EntitlementInfo>,
    pub all: BTreeMap<String, EntitlementInfo>,
}

impl EntitlementInfos {
    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }
}

#[derive(Deserialize)]
struct RawEntitlementInfos {
    #[serde(default, deserialize_with = "null_as_default")]
    active: BTreeMap<String, EntitlementInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    all: BTreeMap<String, EntitlementInfo>,
}

impl From<RawEntitlementInfos> for EntitlementInfos {
    fn from(raw: RawEntitlementInfos) -> Self {
        Self {
            active: fill_identifiers(raw.active),
            all: fill_identifiers(raw.all),
        }
    }
}

fn fill_identifiers(
    mut map: BTreeMap<String, EntitlementInfo>,
) -> BTreeMap<String, EntitlementInfo> {
    for (key, info) in map.iter_mut() {
        if info.identifier.is_empty() {
            info.identifier = key.clone();
        }
    }
    map
}

/// Point-in-time entitlement and purchase-history payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub entitlements: EntitlementInfos,
    /// Every product this customer has ever purchased, in provider order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub all_purchased_product_identifiers: Vec<String>,
    /// Informational only; classification never reads it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_subscriptions: BTreeSet<String>,
    #[serde(default)]
    pub original_app_user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub request_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub latest_expiration_date: Option<DateTime<FixedOffset>>,
}

impl CustomerInfo {
    /// Parse a snapshot from provider JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn has_active_entitlement(&self) -> bool {
        self.entitlements.has_active()
    }

    pub fn has_purchase_history(&self) -> bool {
        !self.all_purchased_product_identifiers.is_empty()
    }
}

/// Parse a provider date.
///
/// Accepts RFC 3339 datetimes (offset preserved), naive datetimes and plain
/// `YYYY-MM-DD` dates. The latter two are taken as UTC.
pub fn parse_provider_date(value: &str) -> Result<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(EntitlementError::InvalidDate(value.to_string()))
}

fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_provider_date(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_full_payload() {
        let json = r#"{
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
                        "identifier": "premium",
                        "periodType": "NORMAL",
                        "willRenew": true,
                        "expirationDate": "2024-12-31T00:00:00Z",
                        "productIdentifier": "vespers_annual"
                    }
                }
            },
            "allPurchasedProductIdentifiers": ["vespers_annual"],
            "activeSubscriptions": ["vespers_annual"],
            "originalAppUserId": "$anon:abc"
        }"#;

        let info = CustomerInfo::from_json(json).unwrap();
        let premium = &info.entitlements.active["premium"];
        assert_eq!(premium.identifier, "premium");
        assert_eq!(premium.period_type, PeriodType::Normal);
        assert!(premium.will_renew);
        assert_eq!(premium.product_identifier, "vespers_annual");
        let expires = premium.expiration_date.unwrap();
        assert_eq!((expires.year(), expires.month(), expires.day()), (2024, 12, 31));
        assert!(info.has_purchase_history());
        assert!(info.active_subscriptions.contains("vespers_annual"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let info = CustomerInfo::from_json("{}").unwrap();
        assert!(info.entitlements.active.is_empty());
        assert!(info.entitlements.all.is_empty());
        assert!(info.all_purchased_product_identifiers.is_empty());
        assert!(info.active_subscriptions.is_empty());

        let info = CustomerInfo::from_json(
            r#"{"entitlements": null, "allPurchasedProductIdentifiers": null}"#,
        )
        .unwrap();
        assert!(!info.has_active_entitlement());
        assert!(!info.has_purchase_history());

        let info = CustomerInfo::from_json(r#"{"entitlements": {"active": {}}}"#).unwrap();
        assert!(info.entitlements.all.is_empty());
    }

    #[test]
    fn test_period_type_parsing() {
        assert_eq!(PeriodType::from("TRIAL".to_string()), PeriodType::Trial);
        assert_eq!(PeriodType::from("trial".to_string()), PeriodType::Trial);
        assert_eq!(PeriodType::from("INTRO".to_string()), PeriodType::Intro);
        assert_eq!(PeriodType::from("lifetime".to_string()), PeriodType::Unknown);
        assert_eq!(PeriodType::Prepaid.to_string(), "PREPAID");

        let json = serde_json::to_string(&PeriodType::Trial).unwrap();
        assert_eq!(json, "\"TRIAL\"");
    }

    #[test]
    fn test_parse_provider_date_formats() {
        let date = parse_provider_date("2024-12-31").unwrap();
        assert_eq!(date.offset().local_minus_utc(), 0);
        assert_eq!(date.hour(), 0);

        let date = parse_provider_date("2024-12-31T23:30:00-05:00").unwrap();
        assert_eq!(date.day(), 31);
        assert_eq!(date.offset().local_minus_utc(), -5 * 3600);

        let date = parse_provider_date("2025-01-15T08:00:00.000").unwrap();
        assert_eq!(date.hour(), 8);

        assert!(matches!(
            parse_provider_date("next tuesday"),
            Err(EntitlementError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_invalid_expiration_date_is_rejected() {
        let json = r#"{"entitlements": {"active": {"premium": {"expirationDate": "soon"}}}}"#;
        assert!(CustomerInfo::from_json(json).is_err());
    }

    #[test]
    fn test_null_expiration_date() {
        let json = r#"{"entitlements": {"active": {"lifetime": {"expirationDate": null}}}}"#;
        let info = CustomerInfo::from_json(json).unwrap();
        assert_eq!(info.entitlements.active["lifetime"].expiration_date, None);
    }
}
