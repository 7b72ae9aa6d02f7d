//! Shared configuration structures.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Read `key` and parse it, falling back to `default` when the variable is
/// missing or unparsable.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Read `key` as a string, falling back to `default`.
pub fn env_string_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Listen address for an HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Load `{PREFIX}_HOST` and `{PREFIX}_PORT`.
    pub fn from_env(prefix: &str) -> Self {
        let defaults = Self::default();
        Self {
            host: env_string_or(&format!("{}_HOST", prefix), &defaults.host),
            port: env_or(&format!("{}_PORT", prefix), defaults.port),
        }
    }

    /// Socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}
