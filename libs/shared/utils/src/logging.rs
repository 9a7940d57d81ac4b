use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shared_config::AppConfig;

/// Install the global tracing subscriber using the configured filter.
///
/// `RUST_LOG` takes precedence when set. Fails if a subscriber is already
/// installed; callers that may race (tests) should ignore the error.
pub fn init_tracing(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| anyhow!("invalid log filter '{}': {}", config.log_filter, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))?;

    tracing::debug!("Tracing initialised with filter '{}'", config.log_filter);
    Ok(())
}
