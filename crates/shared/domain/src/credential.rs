//! Stored credential and the key-derivation parameters recorded with it.
//!
//! Parameters travel with every credential so that changing the default
//! algorithm or cost never strands credentials hashed under older settings.

use std::fmt;
use std::str::FromStr;

use argon2::{Algorithm, Argon2, Params, Version};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::{
    ALGORITHM_ARGON2ID, ALGORITHM_PBKDF2_SHA256, ARGON2_ITERATIONS, ARGON2_MEMORY_KIB,
    ARGON2_PARALLELISM, DERIVED_KEY_LENGTH, MAX_ARGON2_ITERATIONS, MAX_ARGON2_MEMORY_KIB,
    MAX_ARGON2_PARALLELISM, MAX_PBKDF2_ITERATIONS, PBKDF2_ITERATIONS,
};
use crate::error::{DomainError, DomainResult};

/// Derived key buffer, wiped on drop.
pub type DerivedKey = Zeroizing<[u8; DERIVED_KEY_LENGTH]>;

/// Key-derivation function together with its cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KdfParams {
    /// PBKDF2 with HMAC-SHA256
    Pbkdf2Sha256 { iterations: u32 },
    /// Argon2id (version 0x13)
    Argon2id {
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
}

impl KdfParams {
    /// PBKDF2-HMAC-SHA256 with the build-time iteration count.
    pub fn pbkdf2() -> Self {
        KdfParams::Pbkdf2Sha256 {
            iterations: PBKDF2_ITERATIONS,
        }
    }

    /// Argon2id with the build-time cost parameters.
    pub fn argon2id() -> Self {
        KdfParams::Argon2id {
            memory_kib: ARGON2_MEMORY_KIB,
            iterations: ARGON2_ITERATIONS,
            parallelism: ARGON2_PARALLELISM,
        }
    }

    /// Default parameters for an algorithm identifier.
    pub fn for_algorithm(algorithm: &str) -> DomainResult<Self> {
        match algorithm {
            ALGORITHM_PBKDF2_SHA256 => Ok(Self::pbkdf2()),
            ALGORITHM_ARGON2ID => Ok(Self::argon2id()),
            other => Err(DomainError::validation(format!(
                "Unsupported key derivation algorithm: {}",
                other
            ))),
        }
    }

    /// Algorithm identifier.
    pub fn algorithm(&self) -> &'static str {
        match self {
            KdfParams::Pbkdf2Sha256 { .. } => ALGORITHM_PBKDF2_SHA256,
            KdfParams::Argon2id { .. } => ALGORITHM_ARGON2ID,
        }
    }

    /// Whether every cost parameter is at or below its ceiling.
    pub fn within_limits(&self) -> bool {
        match *self {
            KdfParams::Pbkdf2Sha256 { iterations } => iterations <= MAX_PBKDF2_ITERATIONS,
            KdfParams::Argon2id {
                memory_kib,
                iterations,
                parallelism,
            } => {
                memory_kib <= MAX_ARGON2_MEMORY_KIB
                    && iterations <= MAX_ARGON2_ITERATIONS
                    && parallelism <= MAX_ARGON2_PARALLELISM
            }
        }
    }

    /// Derive a key from a password and salt.
    ///
    /// # Errors
    /// Returns an internal error if a cost parameter exceeds its ceiling or
    /// the parameters are rejected by the underlying primitive. Ceilings are
    /// checked before any work is done.
    pub fn derive(&self, password: &[u8], salt: &[u8]) -> DomainResult<DerivedKey> {
        if !self.within_limits() {
            return Err(DomainError::internal(format!(
                "KDF parameters exceed cost ceiling: {}",
                self
            )));
        }

        let mut key: DerivedKey = Zeroizing::new([0u8; DERIVED_KEY_LENGTH]);

        match *self {
            KdfParams::Pbkdf2Sha256 { iterations } => {
                if iterations == 0 {
                    return Err(DomainError::internal("PBKDF2 iteration count must be positive"));
                }
                pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, key.as_mut_slice());
            }
            KdfParams::Argon2id {
                memory_kib,
                iterations,
                parallelism,
            } => {
                let params = Params::new(
                    memory_kib,
                    iterations,
                    parallelism,
                    Some(DERIVED_KEY_LENGTH),
                )
                .map_err(|e| DomainError::internal(format!("Invalid Argon2 parameters: {}", e)))?;

                Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                    .hash_password_into(password, salt, key.as_mut_slice())
                    .map_err(|e| DomainError::internal(format!("Argon2 derivation failed: {}", e)))?;
            }
        }

        Ok(key)
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::pbkdf2()
    }
}

impl fmt::Display for KdfParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KdfParams::Pbkdf2Sha256 { iterations } => {
                write!(f, "{}$i={}", ALGORITHM_PBKDF2_SHA256, iterations)
            }
            KdfParams::Argon2id {
                memory_kib,
                iterations,
                parallelism,
            } => write!(
                f,
                "{}$m={},t={},p={}",
                ALGORITHM_ARGON2ID, memory_kib, iterations, parallelism
            ),
        }
    }
}

impl FromStr for KdfParams {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::validation(format!("Malformed KDF parameters: {}", s));

        let (algorithm, params) = s.split_once('$').ok_or_else(malformed)?;
        let mut values = params.split(',').map(|pair| pair.split_once('='));

        let mut next = |expected: &str| -> Result<u32, DomainError> {
            match values.next() {
                Some(Some((name, value))) if name == expected => {
                    value.parse::<u32>().map_err(|_| malformed())
                }
                _ => Err(malformed()),
            }
        };

        let parsed = match algorithm {
            ALGORITHM_PBKDF2_SHA256 => KdfParams::Pbkdf2Sha256 {
                iterations: next("i")?,
            },
            ALGORITHM_ARGON2ID => KdfParams::Argon2id {
                memory_kib: next("m")?,
                iterations: next("t")?,
                parallelism: next("p")?,
            },
            _ => return Err(malformed()),
        };

        if values.next().is_some() || !parsed.within_limits() {
            return Err(malformed());
        }

        Ok(parsed)
    }
}

impl TryFrom<String> for KdfParams {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KdfParams> for String {
    fn from(params: KdfParams) -> Self {
        params.to_string()
    }
}

/// Salted hash persisted with a user record.
///
/// Hash and salt are base64 (standard alphabet, padded).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    params: KdfParams,
    hash: String,
    salt: String,
}

// Don't expose hash material in debug output (security)
impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("params", &self.params)
            .field("hash", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .finish()
    }
}

impl StoredCredential {
    /// Assemble a credential from stored parts.
    ///
    /// Nothing is validated here; a malformed credential simply never
    /// verifies.
    pub fn from_parts(params: KdfParams, hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            params,
            hash: hash.into(),
            salt: salt.into(),
        }
    }

    pub(crate) fn from_raw(params: KdfParams, key: &[u8], salt: &[u8]) -> Self {
        Self {
            params,
            hash: STANDARD.encode(key),
            salt: STANDARD.encode(salt),
        }
    }

    /// Parameters the hash was derived with.
    pub fn params(&self) -> KdfParams {
        self.params
    }

    /// Base64 derived key.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Base64 salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Decode hash and salt, or `None` if either is not valid base64.
    pub(crate) fn decode(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        let hash = STANDARD.decode(&self.hash).ok()?;
        let salt = STANDARD.decode(&self.salt).ok()?;
        Some((hash, salt))
    }

    /// Single-string form: `$<algorithm>$<params>$<salt>$<hash>`.
    pub fn encode(&self) -> String {
        format!("${}${}${}", self.params, self.salt, self.hash)
    }
}

impl FromStr for StoredCredential {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::validation("Malformed stored credential");

        let mut parts = s.strip_prefix('$').ok_or_else(malformed)?.split('$');
        let (Some(algorithm), Some(params), Some(salt), Some(hash), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(malformed());
        };

        let params: KdfParams = format!("{}${}", algorithm, params).parse()?;
        Ok(Self::from_parts(params, hash, salt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_text_form() {
        assert_eq!(KdfParams::pbkdf2().to_string(), "pbkdf2-sha256$i=100000");
        assert_eq!(
            KdfParams::argon2id().to_string(),
            "argon2id$m=19456,t=2,p=1"
        );
    }

    #[test]
    fn test_params_parse_back() {
        for params in [
            KdfParams::pbkdf2(),
            KdfParams::argon2id(),
            KdfParams::Pbkdf2Sha256 { iterations: 1 },
        ] {
            assert_eq!(params.to_string().parse::<KdfParams>().unwrap(), params);
        }
    }

    #[test]
    fn test_params_reject_garbage() {
        for raw in [
            "",
            "pbkdf2-sha256",
            "pbkdf2-sha256$",
            "pbkdf2-sha256$i=abc",
            "pbkdf2-sha256$x=100",
            "pbkdf2-sha256$i=1,i=2",
            "argon2id$m=1,t=2",
            "md5$i=1",
        ] {
            assert!(raw.parse::<KdfParams>().is_err(), "expected {raw:?} to fail");
        }
    }

    #[test]
    fn test_params_above_ceiling_rejected_on_parse() {
        for raw in [
            "pbkdf2-sha256$i=20000000",
            "pbkdf2-sha256$i=4294967295",
            "argon2id$m=2000000,t=2,p=1",
            "argon2id$m=19456,t=1000,p=1",
            "argon2id$m=19456,t=2,p=255",
        ] {
            assert!(raw.parse::<KdfParams>().is_err(), "expected {raw:?} to fail");
        }

        let at_ceiling = format!("pbkdf2-sha256$i={}", MAX_PBKDF2_ITERATIONS);
        assert!(at_ceiling.parse::<KdfParams>().is_ok());
    }

    #[test]
    fn test_default_params_within_limits() {
        assert!(KdfParams::pbkdf2().within_limits());
        assert!(KdfParams::argon2id().within_limits());
    }

    #[test]
    fn test_derive_above_ceiling_is_internal_error() {
        let result = KdfParams::Pbkdf2Sha256 {
            iterations: u32::MAX,
        }
        .derive(b"pw", b"salt");
        assert!(matches!(result, Err(DomainError::Internal(_))));

        let result = KdfParams::Argon2id {
            memory_kib: 2_000_000,
            iterations: 2,
            parallelism: 1,
        }
        .derive(b"pw", b"0123456789abcdef");
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }

    #[test]
    fn test_for_algorithm() {
        assert_eq!(
            KdfParams::for_algorithm("pbkdf2-sha256").unwrap(),
            KdfParams::pbkdf2()
        );
        assert_eq!(
            KdfParams::for_algorithm("argon2id").unwrap(),
            KdfParams::argon2id()
        );
        assert!(KdfParams::for_algorithm("bcrypt").is_err());
    }

    #[test]
    fn test_pbkdf2_known_answer() {
        // RFC 7914 section 11 test vector for PBKDF2-HMAC-SHA256, c = 1
        let key = KdfParams::Pbkdf2Sha256 { iterations: 1 }
            .derive(b"passwd", b"salt")
            .unwrap();
        assert_eq!(
            &key[..],
            &[
                0x55, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f, 0xec, 0x16, 0x91, 0xc2, 0x25,
                0x44, 0xb6, 0x05, 0xf9, 0x41, 0x85, 0x21, 0x6d, 0xde, 0x04, 0x65, 0xe6, 0x8b,
                0x9d, 0x57, 0xc2, 0x0d, 0xac, 0xbc,
            ]
        );
    }

    #[test]
    fn test_zero_iterations_is_internal_error() {
        let result = KdfParams::Pbkdf2Sha256 { iterations: 0 }.derive(b"pw", b"salt");
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }

    #[test]
    fn test_invalid_argon2_params_is_internal_error() {
        let params = KdfParams::Argon2id {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        };
        let result = params.derive(b"pw", b"0123456789abcdef");
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }

    #[test]
    fn test_credential_encode_parse() {
        let credential =
            StoredCredential::from_parts(KdfParams::pbkdf2(), "aGFzaA==", "c2FsdA==");
        let encoded = credential.encode();
        assert_eq!(encoded, "$pbkdf2-sha256$i=100000$c2FsdA==$aGFzaA==");
        assert_eq!(encoded.parse::<StoredCredential>().unwrap(), credential);
    }

    #[test]
    fn test_credential_parse_rejects_wrong_shape() {
        for raw in [
            "pbkdf2-sha256$i=1$c2FsdA==$aGFzaA==",
            "$pbkdf2-sha256$i=1$c2FsdA==",
            "$pbkdf2-sha256$i=1$c2FsdA==$aGFzaA==$extra",
            "$sha1$i=1$c2FsdA==$aGFzaA==",
        ] {
            assert!(raw.parse::<StoredCredential>().is_err(), "expected {raw:?} to fail");
        }
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential =
            StoredCredential::from_parts(KdfParams::pbkdf2(), "aGFzaA==", "c2FsdA==");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("aGFzaA=="));
        assert!(!debug.contains("c2FsdA=="));
    }

    #[test]
    fn test_params_serialize_as_text() {
        let json = serde_json::to_string(&KdfParams::pbkdf2()).unwrap();
        assert_eq!(json, "\"pbkdf2-sha256$i=100000\"");
    }
}
