//! Environment-driven server configuration.

use std::net::SocketAddr;

use thiserror::Error;

/// Default bind address when `SWITCHBOARD_BIND` is unset.
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Configuration failures surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address '{address}': {message}")]
    InvalidBind { address: String, message: String },

    #[error("SWITCHBOARD_INTERNAL_API_KEY (or INTERNAL_API_KEY) must be set and non-empty")]
    MissingApiKey,
}

/// Runtime configuration for the gateway.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind: SocketAddr,
    /// Shared secret expected in the `x-internal-api-key` header.
    pub internal_api_key: String,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// `SWITCHBOARD_BIND` defaults to [`DEFAULT_BIND`]. The API key comes
    /// from `SWITCHBOARD_INTERNAL_API_KEY`, falling back to the legacy
    /// `INTERNAL_API_KEY` name; an absent or empty key is a startup error
    /// rather than an open gateway.
    pub fn from_env() -> Result<Self, ConfigError> {
        let address = std::env::var("SWITCHBOARD_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind = address.parse().map_err(|error: std::net::AddrParseError| ConfigError::InvalidBind {
            address: address.clone(),
            message: error.to_string(),
        })?;

        let internal_api_key = std::env::var("SWITCHBOARD_INTERNAL_API_KEY")
            .or_else(|_| std::env::var("INTERNAL_API_KEY"))
            .unwrap_or_default();
        if internal_api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self { bind, internal_api_key })
    }
}
