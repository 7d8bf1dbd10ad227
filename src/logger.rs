//! Logger initialization for binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The filter honors `RUST_LOG` when set; otherwise it enables
/// `default_level` for the given binary and for this crate.
pub fn setup_logger(name: &str, default_level: &str) {
    let fallback = format!(
        "{}={default_level},{}={default_level}",
        name.replace('-', "_"),
        env!("CARGO_PKG_NAME").replace('-', "_"),
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
