//! Tracing subscriber setup for the harness binary.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// Falls back to `info` when `RUST_LOG` is unset or invalid. A subscriber that
/// is already installed is left in place.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}
