//! Password value object - plaintext credential awaiting hashing.
//!
//! The plaintext lives in a zeroizing buffer and is wiped when the value is
//! dropped, whether it was accepted or rejected. There is no `Clone`,
//! `Display` or `Serialize`; the only way to read it is `expose_secret`.

use std::fmt;

use zeroize::Zeroizing;

use crate::constants::{MIN_PASSWORD_LENGTH, PASSWORD_SYMBOLS};
use crate::error::{DomainError, DomainResult};

/// Plaintext password that satisfied the complexity policy.
pub struct Password {
    plaintext: Zeroizing<String>,
}

// Don't expose plaintext in debug output (security)
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("plaintext", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Validate a raw password against the complexity policy.
    ///
    /// # Errors
    /// Returns a validation error if the password is blank, shorter than
    /// [`MIN_PASSWORD_LENGTH`] characters, or lacks an uppercase letter, a
    /// lowercase letter, a digit or one of [`PASSWORD_SYMBOLS`].
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let plaintext = Zeroizing::new(raw.into());

        if plaintext.trim().is_empty() {
            return Err(DomainError::validation("Password cannot be empty"));
        }

        if plaintext.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if !meets_complexity(&plaintext) {
            return Err(DomainError::validation(format!(
                "Password must contain at least one uppercase letter, one lowercase letter, \
                 one digit and one special character ({})",
                PASSWORD_SYMBOLS
            )));
        }

        Ok(Self { plaintext })
    }

    /// Borrow the plaintext. Only the credential hasher should call this.
    pub fn expose_secret(&self) -> &str {
        &self.plaintext
    }
}

fn meets_complexity(password: &str) -> bool {
    password.chars().any(char::is_uppercase)
        && password.chars().any(char::is_lowercase)
        && password.chars().any(char::is_numeric)
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}
