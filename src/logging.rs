//! Logging init for binaries embedding a gauge.
//!
//! Standard output carries the progress line, so diagnostics go to stderr. The library
//! itself only emits `tracing` events and never installs a subscriber.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr fmt subscriber filtered by `RUST_LOG` (default [`DEFAULT_FILTER`]).
///
/// Does nothing if a global subscriber is already set.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("atomic-gauge logging initialized");
    }
}
