//! CLI command implementations

pub mod expiry;
pub mod paywall;
pub mod purchase;
pub mod restore;
pub mod status;

use crate::client::FileBillingClient;
use std::sync::Arc;
use vespers_entitlements::{EngineConfig, EntitlementService};

/// Wrap a file-backed client in an entitlement service
pub fn build_service(client: FileBillingClient, config: EngineConfig) -> EntitlementService {
    tracing::debug!("Using customer info snapshot {}", client.path().display());
    EntitlementService::new(Arc::new(client), config)
}
