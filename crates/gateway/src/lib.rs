//! API Gateway Library
//!
//! HTTP surface for the identity service: sign-up, environment probe,
//! health check and OpenAPI docs.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use identity_service_lib::config::IdentityServiceConfig;
use identity_service_lib::{build_auth_service, InMemoryUserRepository};

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the application with an in-memory user store.
pub fn build_app(
    config: GatewayConfig,
    identity: &IdentityServiceConfig,
) -> Result<Router, Box<dyn std::error::Error>> {
    let repo = Arc::new(InMemoryUserRepository::new());
    let auth_service = build_auth_service(identity, repo)?;
    let state = AppState::new(auth_service, config);

    Ok(create_router(state).layer(TraceLayer::new_for_http()))
}

/// Run the gateway on `host:port`, reading the rest of the configuration
/// from the environment.
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::from_env().with_address(host, port);
    run_server_with_config(config).await
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let identity = IdentityServiceConfig::from_env();

    // Build address
    let addr = config.server.socket_addr()?;
    info!(environment = %config.environment, "Starting gateway");

    let app = build_app(config, &identity)?;

    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
