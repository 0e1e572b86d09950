//! Structured logging setup.
//!
//! Events go to stderr through `tracing-subscriber` so stdout carries only
//! results. `RUST_LOG` overrides the `--log-level` flag.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. Safe to call more than once; when a
/// subscriber is already installed the new one is dropped and the existing
/// one records a debug event.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .try_init();
    if let Err(err) = installed {
        tracing::debug!(%err, "subscriber already installed, keeping it");
    }
}
