//! CLI utilities and helpers

pub mod commands;
pub mod handlers;

use tracing_subscriber::EnvFilter;

/// Install the stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (from
/// `logging.level`) applies.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
