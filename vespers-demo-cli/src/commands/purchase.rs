//! Purchase command

use anyhow::Result;
use std::path::Path;
use vespers_entitlements::{BillingError, EngineConfig, Package, PurchaseOutcome};

use super::build_service;
use crate::client::FileBillingClient;
use crate::ui;

#[tracing::instrument(skip(config))]
pub async fn run(
    customer_info: &Path,
    config: EngineConfig,
    package: Package,
    cancel: bool,
    fail: bool,
    json: bool,
) -> Result<()> {
    let mut client = FileBillingClient::new(customer_info);
    if cancel {
        client = client.with_purchase_failure(BillingError::UserCancelled);
    } else if fail {
        client = client.with_purchase_failure(BillingError::Store {
            code: 2,
            message: "simulated store failure".to_string(),
        });
    }
    let service = build_service(client, config);

    let pb = ui::spinner("Waiting for the store...");
    let outcome = service.purchase_package(&package).await;
    pb.finish_and_clear();

    if json {
        ui::json(&outcome);
        return Ok(());
    }

    ui::header("Purchase");
    ui::key_value("Package", &package.identifier);
    ui::key_value("Product", &package.product_identifier);
    if let Some(package_type) = &package.package_type {
        ui::key_value("Type", package_type);
    }
    match &outcome {
        PurchaseOutcome::Purchased { status } => {
            ui::key_value("Status", &ui::status(*status));
            if outcome.grants_access() {
                ui::success("Purchase complete. Premium content unlocked.");
            } else {
                ui::warning("Purchase completed but no entitlement is active yet.");
            }
        }
        PurchaseOutcome::Cancelled => ui::info("Purchase cancelled."),
        PurchaseOutcome::Failed { kind, message } => {
            ui::error(&format!("Purchase failed ({:?}): {}", kind, message));
        }
    }

    Ok(())
}
