//! Logging setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global subscriber. Honors `RUST_LOG`, defaults to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).init();
}

/// Test variant: debug level, captured output, tolerates repeated calls.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
