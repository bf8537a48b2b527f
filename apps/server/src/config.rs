//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port (server binds 0.0.0.0)
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Session lifetime in seconds (default: 8 hours)
    pub session_ttl_secs: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "mostrador.db".to_string()),

            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| "28800".to_string()) // 8 hours
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SESSION_TTL_SECS".to_string()))?,

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?,
        };

        Ok(config)
    }

    /// A fixed configuration for tests: no env reads, short session TTL.
    pub fn for_tests() -> Self {
        ServerConfig {
            port: 0,
            database_path: ":memory:".to_string(),
            session_ttl_secs: 3600,
            request_timeout_secs: 10,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // load() falls back to defaults for unset variables; the test config
        // never reads the environment at all.
        let config = ServerConfig::for_tests();
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.database_path, ":memory:");
    }
}
