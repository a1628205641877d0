//! # Logging Module
//!
//! Environment-aware console logging using the tracing ecosystem.
//! Designed for containerized applications where logs should go to stdout/stderr.
//!
//! This module provides:
//! - Simple console-only logging (container-friendly)
//! - Environment-based log level configuration
//! - TTY-aware ANSI color output
//!
//! Log level resolution order: `LOG_LEVEL` env var, then a per-environment
//! default derived from `GATEWAY_ENV` (development → debug, test → warn,
//! production → info).

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

fn get_environment() -> String {
    std::env::var("GATEWAY_ENV").unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> String {
    std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
        match environment {
            "production" => "info",
            "test" => "warn",
            _ => "debug",
        }
        .to_string()
    })
}

/// Initialize console logging.
///
/// Safe to call more than once; only the first call installs the subscriber.
pub fn init_tracing() {
    TRACING_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);

        // Determine if we're in a TTY for ANSI color support
        let use_ansi = IsTerminal::is_terminal(&std::io::stdout());

        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .with_ansi(use_ansi)
            .with_filter(EnvFilter::new(&log_level));

        let subscriber = tracing_subscriber::registry().with(console_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                environment = %environment,
                log_level = %log_level,
                ansi_colors = use_ansi,
                "Console logging initialized"
            );
        }
    });
}
