//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.

use std::env;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port.
    pub http_port: u16,

    /// Path to the SQLite database file.
    pub database_path: String,

    /// Maximum connections in the database pool.
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT"))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "stockroom.db".to_string()),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS"))?,
        };

        Ok(config)
    }

    /// The socket address to bind.
    pub fn socket_addr(&self) -> String {
        format!("0.0.0.0:{}", self.http_port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(&'static str),
}
