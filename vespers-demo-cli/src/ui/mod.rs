//! Terminal UI utilities

use colored::Colorize;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use vespers_entitlements::{PaywallType, SimpleSubscriptionStatus};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print a section header
pub fn header(text: &str) {
    println!("\n{}", text.bold().underline());
}

/// Print a key-value pair
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Status colored by whether it grants access
pub fn status(status: SimpleSubscriptionStatus) -> String {
    match status {
        SimpleSubscriptionStatus::Unknown => status.to_string().yellow().to_string(),
        s if s.has_access() => s.to_string().green().to_string(),
        s => s.to_string().red().to_string(),
    }
}

/// Paywall type colored by severity
pub fn paywall(paywall: PaywallType) -> String {
    match paywall {
        PaywallType::None => paywall.to_string().green().to_string(),
        PaywallType::Renewal => paywall.to_string().yellow().to_string(),
        PaywallType::Payment => paywall.to_string().red().to_string(),
    }
}

/// Create a spinner progress indicator
///
/// Hidden when stdout is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    if !Term::stdout().is_term() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a separator line
pub fn separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// Print JSON prettily
pub fn json<T: serde::Serialize>(value: &T) {
    if let Ok(pretty) = serde_json::to_string_pretty(value) {
        println!("{}", pretty);
    }
}
