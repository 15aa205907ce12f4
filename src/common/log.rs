//! Tracing setup for the binary.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. RUST_LOG wins over the configured
/// filter; an unparsable filter falls back to `info`.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
