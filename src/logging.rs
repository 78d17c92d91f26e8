//! Logging setup.
//!
//! Output goes through `tracing-subscriber`. The level filter comes from
//! `RUST_LOG` and falls back to `info`, so `RUST_LOG=payroll_engine=debug`
//! turns on per-calculation and per-batch events.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber for the server binary.
///
/// # Examples
///
/// ```no_run
/// payroll_engine::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Installs a debug-level subscriber that writes through the test harness.
///
/// Safe to call from several tests; only the first call installs anything.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
