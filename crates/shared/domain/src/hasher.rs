//! Credential hasher - salted key derivation and verification.
//!
//! DDD: Domain service consumed by the user factory.

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};

use crate::constants::{DERIVED_KEY_LENGTH, SALT_LENGTH};
use crate::credential::{KdfParams, StoredCredential};
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// Derives and checks stored credentials.
pub trait CredentialHasher: Send + Sync {
    /// Hash a password under a fresh random salt.
    ///
    /// The password is consumed; its plaintext is wiped when this returns.
    ///
    /// # Errors
    /// Returns an internal error if the RNG or key derivation fails.
    fn hash(&self, password: Password) -> DomainResult<StoredCredential>;

    /// Check a plaintext against a stored credential using the parameters
    /// recorded in it. Malformed credentials, and credentials whose recorded
    /// cost exceeds the ceilings in [`crate::constants`], never verify.
    fn verify(&self, plaintext: &str, stored: &StoredCredential) -> bool;
}

/// Hasher backed by the KDFs in [`KdfParams`].
///
/// New credentials use `params`; verification always uses whatever the
/// credential itself records.
#[derive(Debug, Clone, Default)]
pub struct KdfHasher {
    params: KdfParams,
}

impl KdfHasher {
    /// Create a hasher that derives new credentials with `params`.
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    /// Parameters used for new credentials.
    pub fn params(&self) -> KdfParams {
        self.params
    }

    /// Verify against the single-string form produced by
    /// [`StoredCredential::encode`].
    pub fn verify_encoded(&self, plaintext: &str, encoded: &str) -> bool {
        match encoded.parse::<StoredCredential>() {
            Ok(stored) => self.verify(plaintext, &stored),
            Err(_) => false,
        }
    }
}

impl CredentialHasher for KdfHasher {
    fn hash(&self, password: Password) -> DomainResult<StoredCredential> {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| DomainError::internal(format!("Salt generation failed: {}", e)))?;

        let key = self.params.derive(password.expose_secret().as_bytes(), &salt)?;
        Ok(StoredCredential::from_raw(self.params, key.as_slice(), &salt))
    }

    fn verify(&self, plaintext: &str, stored: &StoredCredential) -> bool {
        let Some((expected, salt)) = stored.decode() else {
            return false;
        };

        if expected.len() != DERIVED_KEY_LENGTH
            || salt.is_empty()
            || !stored.params().within_limits()
        {
            return false;
        }

        match stored.params().derive(plaintext.as_bytes(), &salt) {
            Ok(actual) => constant_time_eq(actual.as_slice(), &expected),
            Err(_) => false,
        }
    }
}
