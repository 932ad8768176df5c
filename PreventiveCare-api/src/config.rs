//! Runtime configuration read from the environment.

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Server settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Interface to bind (default `0.0.0.0`)
    pub host: IpAddr,
    /// Port to bind (default 3000)
    pub port: u16,
    /// Deployment environment name reported by the health check
    pub environment: String,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Allowed CORS origin; `*` allows any
    pub cors_allow_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            cors_allow_origin: "*".to_string(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = match read("HOST") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name: "HOST", value })?,
            None => defaults.host,
        };

        let port = match read("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value })?,
            None => defaults.port,
        };

        Ok(Self {
            host,
            port,
            environment: read("APP_ENV").unwrap_or(defaults.environment),
            log_level: read("LOG_LEVEL").unwrap_or(defaults.log_level),
            cors_allow_origin: read("CORS_ALLOW_ORIGIN").unwrap_or(defaults.cors_allow_origin),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
