//! Application state for dependency injection.

use std::sync::Arc;

use identity_service_lib::service::AuthService;

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(auth_service: Arc<dyn AuthService>, config: GatewayConfig) -> Self {
        Self {
            auth_service,
            config,
        }
    }
}
