//! Logging setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServiceConfig;

/// Build the filter: `RUST_LOG` wins, then the configured directive.
pub fn env_filter(config: &ServiceConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
}

/// Install the global subscriber (fmt layer + env filter).
///
/// Fails if a global subscriber is already set.
pub fn init(config: &ServiceConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = env_filter(config);
    let active = filter.to_string();
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::info!(filter = %active, "logging initialised");
    Ok(())
}
