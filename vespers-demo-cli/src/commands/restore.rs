//! Restore purchases command

use anyhow::Result;
use std::path::Path;
use vespers_entitlements::{BillingError, EngineConfig, RestoreFeedback};

use super::build_service;
use crate::client::FileBillingClient;
use crate::ui;

#[tracing::instrument(skip(config))]
pub async fn run(
    customer_info: &Path,
    config: EngineConfig,
    fail: bool,
    cancel: bool,
    json: bool,
) -> Result<()> {
    let mut client = FileBillingClient::new(customer_info);
    if cancel {
        client = client.with_restore_failure(BillingError::UserCancelled);
    } else if fail {
        client = client.with_restore_failure(BillingError::Network(
            "simulated restore failure".to_string(),
        ));
    }
    let service = build_service(client, config);

    let pb = ui::spinner("Restoring purchases...");
    let result = service.restore_purchases().await;
    pb.finish_and_clear();

    if json {
        ui::json(&result);
        return Ok(());
    }

    let feedback = result.feedback();
    match feedback {
        RestoreFeedback::Restored => ui::success(feedback.message()),
        RestoreFeedback::NothingToRestore => ui::info(feedback.message()),
        RestoreFeedback::Cancelled => tracing::info!("Restore cancelled"),
        RestoreFeedback::Failed => {
            ui::error(feedback.message());
            ui::info("Run 'vespers-demo restore' again to retry.");
        }
    }

    Ok(())
}
