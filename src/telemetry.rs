//! Tracing setup for the `axl` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job. Library consumers can wire their own subscriber instead.

use tracing_subscriber::EnvFilter;

/// Install a compact fmt subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`, so failed bound
/// layers are visible without any configuration.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .is_ok()
}
