//! Diagnostic logging for the command-line front end.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary so the report on stdout stays clean.

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LEVEL: &str = "warn";

/// Builds the filter: `RUST_LOG` wins, otherwise `mixem=<level>`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("mixem={}", level)))
}

/// Installs a human-readable stderr subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: &str) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt_layer)
        .try_init();
}
