//! Status and detail commands

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use vespers_entitlements::{
    CustomerInfo, EngineConfig, SimpleSubscriptionStatus, SubscriptionStatus,
};

use super::build_service;
use crate::client::FileBillingClient;
use crate::ui;

/// Show the coarse status and the paywall it routes to
#[tracing::instrument(skip(config))]
pub async fn run(
    customer_info: &Path,
    config: EngineConfig,
    not_ready: bool,
    json: bool,
) -> Result<()> {
    let client = FileBillingClient::new(customer_info).with_ready(!not_ready);
    let service = build_service(client, config);

    let status = service.get_simple_subscription_status().await;
    let paywall = service.get_paywall_type(status);

    if json {
        ui::json(&serde_json::json!({ "status": status, "paywall": paywall }));
        return Ok(());
    }

    ui::header("Subscription Status");
    ui::key_value("Status", &ui::status(status));
    ui::key_value("Paywall", &ui::paywall(paywall));
    ui::separator();

    match status {
        SimpleSubscriptionStatus::Active | SimpleSubscriptionStatus::TrialActive => {
            ui::success("Premium content unlocked");
        }
        // TODO: the classifier folds cancelled subscriptions into `active`, so this
        // branch is unreachable; remove it once product confirms the fold is intended.
        SimpleSubscriptionStatus::CancelledButActive => {
            ui::warning("Subscription cancelled; access continues until the period ends");
        }
        SimpleSubscriptionStatus::Expired | SimpleSubscriptionStatus::TrialExpired => {
            ui::info("Subscription lapsed. Showing the renewal paywall.");
        }
        SimpleSubscriptionStatus::NeverSubscribed => {
            ui::info("No subscription yet. Showing the payment paywall.");
        }
        SimpleSubscriptionStatus::Unknown => {
            ui::warning("Could not verify the subscription. Access stays locked.");
        }
    }

    Ok(())
}

/// Show the detailed status record
#[tracing::instrument(skip(config))]
pub async fn detail(customer_info: &Path, config: EngineConfig, json: bool) -> Result<()> {
    let service = build_service(FileBillingClient::new(customer_info), config);
    let detail = service.get_subscription_status().await;

    // Account fields are informational; a failed read leaves them empty
    let account = match service.client().get_customer_info().await {
        Ok(info) => AccountView::from(&info),
        Err(e) => {
            tracing::debug!(error = %e, "account fields unavailable");
            AccountView::default()
        }
    };

    if json {
        ui::json(&DetailView {
            status: &detail,
            account: &account,
        });
        return Ok(());
    }

    ui::header("Subscription Details");
    ui::key_value("Summary", &service.get_subscription_status_text(&detail));
    ui::key_value("Active", &detail.is_active.to_string());
    ui::key_value("Trial", &detail.is_trial.to_string());
    ui::key_value("Renews", &detail.will_renew.to_string());
    if let Some(entitlement) = &detail.entitlement_identifier {
        ui::key_value("Entitlement", entitlement);
    }
    if let Some(product) = &detail.product_identifier {
        ui::key_value("Product", product);
    }
    if let Some(expires_at) = &detail.expires_at {
        ui::key_value("Expires", &service.format_expiry_date(expires_at));
        if service.is_subscription_expiring_soon(Some(expires_at)) {
            ui::warning(&format!(
                "Expires within {} days",
                service.config().expiring_soon_threshold_days
            ));
        }
    }

    if let Some(app_user_id) = &account.original_app_user_id {
        ui::key_value("App user", app_user_id);
    }
    if let Some(request_date) = &account.request_date {
        ui::key_value("Requested", request_date);
    }
    if let Some(latest) = &account.latest_expiration_date {
        ui::key_value("Latest expiry", latest);
    }

    Ok(())
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountView {
    original_app_user_id: Option<String>,
    request_date: Option<String>,
    latest_expiration_date: Option<String>,
}

impl From<&CustomerInfo> for AccountView {
    fn from(info: &CustomerInfo) -> Self {
        Self {
            original_app_user_id: info.original_app_user_id.clone(),
            request_date: info.request_date.map(|d| d.to_rfc3339()),
            latest_expiration_date: info.latest_expiration_date.map(|d| d.to_rfc3339()),
        }
    }
}

#[derive(Serialize)]
struct DetailView<'a> {
    #[serde(flatten)]
    status: &'a SubscriptionStatus,
    #[serde(flatten)]
    account: &'a AccountView,
}
