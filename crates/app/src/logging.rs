//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Picks the filter: `--log`, then `RUST_LOG`, then the configured level.
fn filter(cli: Option<&str>, configured: &str) -> EnvFilter {
    cli.map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(configured))
}

/// Installs the global subscriber writing to stderr.
pub fn init(cli: Option<&str>, configured: &str) {
    tracing_subscriber::registry()
        .with(filter(cli, configured))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
