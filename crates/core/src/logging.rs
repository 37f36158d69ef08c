//! Structured logging infrastructure for Redoubt.
//!
//! Centralized logging initialization with environment-based filtering.
//! The subsystem itself only emits `tracing` events; hosting applications
//! that already install their own subscriber can skip these helpers.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system with human-readable output.
///
/// Log level is configured via the `RUST_LOG` environment variable and
/// defaults to `info`. Safe to call more than once; later calls are no-ops
/// so test binaries can initialize freely.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

/// Initialize the logging system with JSON output.
///
/// Suitable for log aggregation on devices that ship logs off-box. Same
/// filtering and idempotency rules as [`init`].
pub fn init_json() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_target(true))
        .try_init();
}
