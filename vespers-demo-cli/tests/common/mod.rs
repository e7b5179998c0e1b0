//! Common test utilities for vespers-demo-cli integration tests

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

pub const ACTIVE_ANNUAL: &str = r#"{
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

pub const TRIAL_EXPIRED: &str = r#"{
    "entitlements": {
        "active": {},
        "all": {
            "premium": {
                "periodType": "TRIAL",
                "willRenew": false,
                "expirationDate": "2023-06-01",
                "productIdentifier": "vespers_monthly"
            }
        }
    },
    "allPurchasedProductIdentifiers": ["vespers_monthly"],
    "activeSubscriptions": []
}"#;

pub const NEVER_SUBSCRIBED: &str = r#"{
    "entitlements": {"active": {}, "all": {}},
    "allPurchasedProductIdentifiers": [],
    "activeSubscriptions": []
}"#;

/// Test context with an isolated config directory
#[allow(dead_code)]
pub struct TestContext {
    pub temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Write a snapshot file and return its path
    pub fn snapshot(&self, name: &str, json: &str) -> PathBuf {
        let path = self.temp_dir.path().join(format!("{}.json", name));
        std::fs::write(&path, json).unwrap();
        path
    }

    /// Run the CLI with the given arguments
    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("Failed to execute command")
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vespers-demo"));
        cmd.env("HOME", self.temp_dir.path())
            .env("XDG_CONFIG_HOME", self.temp_dir.path())
            .env("NO_COLOR", "1")
            .env_remove("VESPERS_EXPIRY_THRESHOLD_DAYS")
            .env_remove("VESPERS_PREFERRED_ENTITLEMENT");
        cmd
    }
}

/// Combined stdout and stderr
#[allow(dead_code)]
pub fn output_text(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
