//! Tracing setup shared by binaries and tests embedding value objects.
//!
//! Library crates only emit events; installing a subscriber is left to the
//! process that hosts them.

/// Initialize process-wide tracing with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize tracing for a test binary (captured, human-readable output).
///
/// Safe to call from every test.
pub fn init_for_tests() {
    tracing::init_for_tests();
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;
