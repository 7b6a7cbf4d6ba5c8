//! Tracing setup for the light provider program.
//!
//! Logs go to stderr so stdout only carries the fetched data.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize the global tracing subscriber at `level`.
///
/// # Errors
/// Returns an error if a global subscriber is already set.
pub fn init_subscriber(level: Level) -> Result<()> {
    Registry::default()
        .with(EnvFilter::new(level.as_str().to_lowercase()))
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to set global default subscriber")
}
