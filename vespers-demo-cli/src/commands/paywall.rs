//! Paywall routing command

use anyhow::{anyhow, Result};
use vespers_entitlements::{get_paywall_type, SimpleSubscriptionStatus};

use crate::ui;

/// Print the paywall for one status, or the whole routing table
pub fn run(status: Option<&str>, all: bool) -> Result<()> {
    if all {
        ui::header("Paywall Routing");
        for status in SimpleSubscriptionStatus::ALL {
            ui::key_value(status.as_str(), &ui::paywall(get_paywall_type(status)));
        }
        return Ok(());
    }

    let raw = status.ok_or_else(|| anyhow!("Pass a status or --all"))?;
    let status: SimpleSubscriptionStatus = raw.parse()?;
    println!("{}", get_paywall_type(status));
    Ok(())
}
