//! Logging initialization helpers
//!
//! Thin wrappers over `tracing-subscriber` so embedding applications and
//! examples can get sensible output with one call. Respects `RUST_LOG` when
//! set.

use tracing_subscriber::EnvFilter;

/// Initialize human-readable logging at `info` level (or `RUST_LOG`)
pub fn init() {
    init_with_filter("info");
}

/// Initialize human-readable logging with a default filter directive
///
/// `RUST_LOG` takes precedence when set. Safe to call more than once; later
/// calls are no-ops.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Initialize JSON logging, for deployments that ship logs to a collector
pub fn init_json(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init();
}
