//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{AppError, AppResult};

/// Builds the event filter. A non-empty `RUST_LOG` wins over the configured directive.
///
/// # Errors
///
/// Returns `AppError::Config` if the chosen directive cannot be parsed.
pub fn build_filter(config: &LoggingConfig) -> AppResult<EnvFilter> {
    let (source, directives) = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(value) if !value.trim().is_empty() => (EnvFilter::DEFAULT_ENV, value),
        _ => ("log filter", config.filter.clone()),
    };

    EnvFilter::try_new(&directives)
        .map_err(|e| AppError::Config(format!("invalid {source} '{directives}': {e}")))
}

/// Installs the global tracing subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already installed, so
/// calling this more than once is harmless.
///
/// # Errors
///
/// Returns `AppError::Config` if the log filter is invalid.
pub fn init(config: &LoggingConfig) -> AppResult<bool> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    Ok(installed.is_ok())
}
