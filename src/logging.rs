//! Logging setup for host binaries.
//!
//! This crate logs through `tracing` macros; embedding services that
//! already install a subscriber can ignore this module. `init_logging`
//! installs a plain console subscriber filtered by the `RUST_LOG`
//! environment variable (default `info`).

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Initialize console logging.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> Result<(), TryInitError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish()
        .try_init()
}
