//! Expiry helpers for detail screens.

use crate::SubscriptionStatus;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

/// Days before expiry at which a subscription counts as expiring soon.
pub const DEFAULT_EXPIRING_SOON_DAYS: i64 = 3;

/// Long-form date, e.g. "December 31, 2024".
///
/// The date is rendered in its own offset; no timezone conversion happens.
pub fn format_expiry_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Whether `date` falls within `threshold_days` from now (inclusive).
///
/// Dates already in the past also count as expiring soon. A window too
/// large to represent covers every date.
pub fn is_expiring_soon(date: Option<&DateTime<FixedOffset>>, threshold_days: i64) -> bool {
    is_expiring_soon_at(date, threshold_days, Utc::now())
}

/// [`is_expiring_soon`] against an explicit clock.
pub fn is_expiring_soon_at(
    date: Option<&DateTime<FixedOffset>>,
    threshold_days: i64,
    now: DateTime<Utc>,
) -> bool {
    let Some(date) = date else {
        return false;
    };
    match Duration::try_days(threshold_days).and_then(|window| now.checked_add_signed(window)) {
        Some(limit) => date.with_timezone(&Utc) <= limit,
        // Window reaches past the last representable instant
        None => threshold_days > 0,
    }
}

/// Human-readable one-line summary of a detailed status.
pub fn status_text(detail: &SubscriptionStatus) -> String {
    if !detail.is_active {
        return if detail.is_trial {
            "Free trial ended".to_string()
        } else {
            "No active subscription".to_string()
        };
    }

    let Some(expires_at) = detail.expires_at.as_ref() else {
        return if detail.is_trial {
            "Free trial".to_string()
        } else {
            "Active".to_string()
        };
    };

    let date = format_expiry_date(expires_at);
    if detail.is_trial {
        format!("Free trial (ends {})", date)
    } else if detail.will_renew {
        format!("Active (renews {})", date)
    } else {
        format!("Active (expires {})", date)
    }
}
