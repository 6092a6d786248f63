//! Subscriber initialization.
//!
//! Filtering is configured through `RUST_LOG`. Descriptor resolution and
//! rejected assignments log at `debug`; per-candidate checks at `trace`.

use tracing_subscriber::EnvFilter;

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize JSON tracing for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Initialize tracing that writes through the test harness's capture.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("debug"))
        .with_test_writer()
        .try_init();
}
