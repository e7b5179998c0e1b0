//! Expiry helper command

use anyhow::Result;
use vespers_entitlements::customer_info::parse_provider_date;
use vespers_entitlements::{format_expiry_date, is_expiring_soon, EngineConfig};

use crate::ui;

pub fn run(date: &str, days: Option<i64>, config: &EngineConfig) -> Result<()> {
    let date = parse_provider_date(date)?;
    let threshold = match days {
        Some(days) => {
            config
                .clone()
                .with_expiring_soon_threshold_days(days)
                .validate()?;
            days
        }
        None => config.expiring_soon_threshold_days,
    };

    ui::key_value("Expires", &format_expiry_date(&date));
    if is_expiring_soon(Some(&date), threshold) {
        ui::warning(&format!("Expiring within {} days", threshold));
    } else {
        ui::info(&format!("More than {} days remaining", threshold));
    }
    Ok(())
}
