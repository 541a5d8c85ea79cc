//! Logging setup for host processes.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "adapt_browserslist=info";

/// Initialize the fmt subscriber. RUST_LOG wins when set; otherwise a
/// crate-scoped info filter applies.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
