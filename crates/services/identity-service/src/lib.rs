//! Identity Service Library
//!
//! User registration: the repository contract, an in-memory store and the
//! sign-up service. Transports (the HTTP gateway) build on [`build_auth_service`].

pub mod config;
pub mod repository;
pub mod service;

use std::sync::Arc;

use domain::{DomainResult, KdfHasher};
use tracing::info;

use crate::config::IdentityServiceConfig;
use crate::repository::UserRepository;
use crate::service::{AuthService, Registrar};

pub use crate::repository::InMemoryUserRepository;

/// Wire a sign-up service over `repo` using `config`.
///
/// # Errors
/// Returns a validation error if the configured KDF algorithm is unknown.
pub fn build_auth_service(
    config: &IdentityServiceConfig,
    repo: Arc<dyn UserRepository>,
) -> DomainResult<Arc<dyn AuthService>> {
    let params = config.kdf_params()?;
    info!(
        kdf = %params,
        timeout_ms = config.signup_timeout_ms,
        "Identity service configured"
    );

    let hasher = Arc::new(KdfHasher::new(params));
    let service = Registrar::new(repo, hasher).with_deadline(config.signup_timeout());

    Ok(Arc::new(service))
}
