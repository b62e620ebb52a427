//! Environment-driven tracker configuration.

use thiserror::Error;

/// Variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_ENV: &str = "TASKBOARD_DATABASE_URL";
/// Variable holding the connection pool size.
pub const POOL_SIZE_ENV: &str = "TASKBOARD_DB_POOL_SIZE";
/// Variable holding the tracing filter directive.
pub const LOG_FILTER_ENV: &str = "TASKBOARD_LOG";

/// Pool size used when none is configured.
pub const DEFAULT_POOL_SIZE: u32 = 8;
/// Tracing filter used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The pool size is not a number.
    #[error("{POOL_SIZE_ENV} must be a positive integer, got '{0}'")]
    InvalidPoolSize(String),
    /// The pool size is zero.
    #[error("{POOL_SIZE_ENV} must be greater than zero")]
    ZeroPoolSize,
}

/// Backing store selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Process-local store; contents are lost on exit.
    InMemory,
    /// `PostgreSQL` store.
    Postgres {
        /// Connection URL.
        database_url: String,
        /// Maximum pooled connections.
        pool_size: u32,
    },
}

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    store: StoreConfig,
    log_filter: String,
}

impl TrackerConfig {
    /// Configuration for an in-memory tracker with default logging.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: StoreConfig::InMemory,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// A blank database URL selects the in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = non_blank(lookup(LOG_FILTER_ENV))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        let store = match non_blank(lookup(DATABASE_URL_ENV)) {
            Some(database_url) => StoreConfig::Postgres {
                database_url,
                pool_size: parse_pool_size(non_blank(lookup(POOL_SIZE_ENV)))?,
            },
            None => StoreConfig::InMemory,
        };

        Ok(Self { store, log_filter })
    }

    /// Returns the store selection.
    #[must_use]
    pub const fn store(&self) -> &StoreConfig {
        &self.store
    }

    /// Returns the tracing filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn parse_pool_size(value: Option<String>) -> Result<u32, ConfigError> {
    let Some(raw) = value else {
        return Ok(DEFAULT_POOL_SIZE);
    };
    let size = raw
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidPoolSize(raw.clone()))?;
    if size == 0 {
        return Err(ConfigError::ZeroPoolSize);
    }
    Ok(size)
}
