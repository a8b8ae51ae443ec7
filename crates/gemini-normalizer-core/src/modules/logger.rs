//! Logging setup.
//!
//! The library only emits `tracing` events; binaries call [`init_logging`]
//! once to install a subscriber.

use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install a stderr fmt subscriber. Returns false if one was already set.
pub fn init_logging(default_level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
