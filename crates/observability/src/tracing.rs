//! Tracing/logging initialization.
//!
//! The ability engine logs degraded loads (fail-closed warnings) through
//! `tracing`; this module gives every binary and test harness the same
//! JSON-formatted, env-filtered subscriber.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). Defaults to
/// `info` when `RUST_LOG` is unset.
pub fn init() {
    init_with_default_filter("info");
}

/// Initialize with an explicit fallback filter directive.
///
/// `RUST_LOG` still wins when set; the directive only applies when the
/// environment carries no filter.
pub fn init_with_default_filter(directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
