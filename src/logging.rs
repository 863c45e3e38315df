// ==========================================
// Logging initialization
// ==========================================
// Uses tracing + tracing-subscriber. Level is controlled by the RUST_LOG
// environment variable.
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes process-wide logging.
///
/// # Environment variables
/// - `RUST_LOG`: level filter (default: `info`), e.g. `RUST_LOG=debug` or
///   `RUST_LOG=reagent_tray_optimizer=trace`.
///
/// # Example
/// ```no_run
/// use reagent_tray_optimizer::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Initializes logging for tests: more verbose, and safe to call from
/// multiple test threads (`try_init` ignores a second call).
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
