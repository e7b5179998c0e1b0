//! Vespers Demo CLI
//!
//! Drives the entitlement engine against a CustomerInfo JSON snapshot, the
//! same payload the billing SDK hands the app.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vespers_entitlements::Package;

mod client;
mod commands;
mod config;
mod ui;

#[derive(Parser)]
#[command(name = "vespers-demo")]
#[command(about = "Vespers Demo CLI - Resolve subscription status and paywall routing", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Engine config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a snapshot and show the paywall it routes to
    Status {
        /// CustomerInfo JSON file
        #[arg(short = 'i', long)]
        customer_info: PathBuf,

        /// Simulate a billing client that is not configured yet
        #[arg(long)]
        not_ready: bool,

        /// Print JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Show the detailed subscription record
    Detail {
        /// CustomerInfo JSON file
        #[arg(short = 'i', long)]
        customer_info: PathBuf,

        /// Print JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Show the paywall for a status
    Paywall {
        /// Status, e.g. never_subscribed or trial_expired
        status: Option<String>,

        /// Print the full routing table
        #[arg(long, conflicts_with = "status")]
        all: bool,
    },

    /// Restore purchases from the snapshot
    Restore {
        /// CustomerInfo JSON file returned by the restore
        #[arg(short = 'i', long)]
        customer_info: PathBuf,

        /// Simulate a provider failure
        #[arg(long)]
        fail: bool,

        /// Simulate the user cancelling
        #[arg(long, conflicts_with = "fail")]
        cancel: bool,

        /// Print JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Purchase a package and classify the resulting snapshot
    Purchase {
        /// CustomerInfo JSON file returned after the purchase
        #[arg(short = 'i', long)]
        customer_info: PathBuf,

        /// Package identifier
        #[arg(short, long)]
        package: String,

        /// Store product identifier (defaults to the package id)
        #[arg(long)]
        product: Option<String>,

        /// Package type, e.g. MONTHLY or ANNUAL
        #[arg(long)]
        package_type: Option<String>,

        /// Simulate the user cancelling
        #[arg(long)]
        cancel: bool,

        /// Simulate a store failure
        #[arg(long, conflicts_with = "cancel")]
        fail: bool,

        /// Print JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Format an expiry date and check whether it is close
    Expiry {
        /// Date (YYYY-MM-DD or RFC 3339)
        date: String,

        /// Threshold in days (defaults to the configured threshold)
        #[arg(short, long)]
        days: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("vespers_demo_cli=debug,vespers_entitlements=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("vespers_demo_cli=info,vespers_entitlements=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    let config = config::load(cli.config.as_deref())?;

    // Dispatch commands
    match cli.command {
        Commands::Status {
            customer_info,
            not_ready,
            json,
        } => {
            commands::status::run(&customer_info, config, not_ready, json).await?;
        }
        Commands::Detail {
            customer_info,
            json,
        } => {
            commands::status::detail(&customer_info, config, json).await?;
        }
        Commands::Paywall { status, all } => {
            commands::paywall::run(status.as_deref(), all)?;
        }
        Commands::Restore {
            customer_info,
            fail,
            cancel,
            json,
        } => {
            commands::restore::run(&customer_info, config, fail, cancel, json).await?;
        }
        Commands::Purchase {
            customer_info,
            package,
            product,
            package_type,
            cancel,
            fail,
            json,
        } => {
            let package = Package::new(&package, product.unwrap_or_else(|| package.clone()));
            let package = match package_type {
                Some(package_type) => package.with_package_type(package_type),
                None => package,
            };
            commands::purchase::run(&customer_info, config, package, cancel, fail, json).await?;
        }
        Commands::Expiry { date, days } => {
            commands::expiry::run(&date, days, &config)?;
        }
    }

    Ok(())
}
