//! Depot API configuration module.
//!
//! Configuration is loaded from environment variables. The database url is
//! required; the port falls back to a default.

use std::env;

/// Default HTTP port when `HTTP_PORT` is unset.
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Depot API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP server port
    pub http_port: u16,

    /// SQLite connection string
    pub database_url: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` must be set and non-blank; there is no default store
    /// to fall back to. `HTTP_PORT` defaults to 8080.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(env::var("HTTP_PORT").ok(), env::var("DATABASE_URL").ok())
    }

    fn from_vars(port: Option<String>, database_url: Option<String>) -> Result<Self, ConfigError> {
        let http_port = match port {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,
            None => DEFAULT_HTTP_PORT,
        };

        let database_url = database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingRequired("DATABASE_URL".to_string()))?;

        Ok(ApiConfig {
            http_port,
            database_url,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
