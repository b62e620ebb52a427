//! Tracing subscriber installation.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid tracing filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Installs a formatted tracing subscriber filtered by `filter`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is left in place.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `filter` is not a valid
/// directive.
pub fn init_tracing(filter: &str) -> Result<bool, TelemetryError> {
    let env_filter = EnvFilter::try_new(filter)?;
    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok();
    Ok(installed)
}
