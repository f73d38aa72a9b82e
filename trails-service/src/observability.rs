//! Structured logging setup

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Result};

/// Install the global JSON tracing subscriber.
///
/// `service.log_level` accepts any `EnvFilter` directive; an unparsable value
/// falls back to `info`. Calling this twice is an error from the subscriber
/// registry, reported as [`crate::error::Error::Internal`].
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| crate::error::Error::Internal(format!("Failed to install tracing subscriber: {}", e)))?;

    tracing::info!(
        service = %config.service.name,
        environment = %config.service.environment,
        "Tracing initialized"
    );

    Ok(())
}
