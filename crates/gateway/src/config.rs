//! Gateway configuration.

use common::{env_string_or, ServerConfig};

/// Environment name reported when `APP_ENVIRONMENT` is unset
pub const DEFAULT_ENVIRONMENT: &str = "Development";

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Listen address (`GATEWAY_HOST`, `GATEWAY_PORT`)
    pub server: ServerConfig,
    /// Deployment environment name, served by the home endpoint
    pub environment: String,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env("GATEWAY"),
            environment: env_string_or("APP_ENVIRONMENT", DEFAULT_ENVIRONMENT),
        }
    }

    /// Same configuration listening on `host:port`.
    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.server.host = host.into();
        self.server.port = port;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}
