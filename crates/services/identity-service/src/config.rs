//! Identity service configuration.

use std::time::Duration;

use common::{env_or, env_string_or};
use domain::{DomainResult, KdfParams, ALGORITHM_PBKDF2_SHA256};

/// Default sign-up deadline in milliseconds
pub const DEFAULT_SIGNUP_TIMEOUT_MS: u64 = 30_000;

/// Identity service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityServiceConfig {
    /// Key derivation algorithm for new credentials
    pub kdf_algorithm: String,
    /// Upper bound on a single sign-up, in milliseconds
    pub signup_timeout_ms: u64,
}

impl IdentityServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            kdf_algorithm: env_string_or("IDENTITY_KDF_ALGORITHM", ALGORITHM_PBKDF2_SHA256),
            signup_timeout_ms: env_or("IDENTITY_SIGNUP_TIMEOUT_MS", DEFAULT_SIGNUP_TIMEOUT_MS),
        }
    }

    /// KDF parameters for the configured algorithm.
    ///
    /// # Errors
    /// Returns a validation error for an unknown algorithm name.
    pub fn kdf_params(&self) -> DomainResult<KdfParams> {
        KdfParams::for_algorithm(&self.kdf_algorithm)
    }

    /// Sign-up deadline.
    pub fn signup_timeout(&self) -> Duration {
        Duration::from_millis(self.signup_timeout_ms)
    }
}

impl Default for IdentityServiceConfig {
    fn default() -> Self {
        Self {
            kdf_algorithm: ALGORITHM_PBKDF2_SHA256.to_string(),
            signup_timeout_ms: DEFAULT_SIGNUP_TIMEOUT_MS,
        }
    }
}
