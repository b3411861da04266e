//! Logging configuration and initialization
//!
//! This module sets up the tracing subscriber for structured logging
//! throughout the application.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system with the specified level
///
/// Sets up tracing with a filter based on the provided log level.
/// `RUST_LOG`, when set, takes precedence.
///
/// # Arguments
///
/// * `log_level` - The log level string (trace, debug, info, warning, error, critical)
pub fn init_logging(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(normalize_level(log_level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Map a configured level onto a tracing filter directive
///
/// Only the first word is used so trailing comments are tolerated.
/// Unknown levels fall back to "info".
fn normalize_level(log_level: &str) -> &'static str {
    let level = log_level
        .split_whitespace()
        .next()
        .unwrap_or("info")
        .to_lowercase();

    match level.as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" => "error",
        _ => "info",
    }
}
