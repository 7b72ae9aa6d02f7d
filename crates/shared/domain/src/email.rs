//! Email value object.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::EMAIL_PATTERN;
use crate::error::{DomainError, DomainResult};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));

/// Validated, lower-cased email address.
///
/// Normalization happens once at construction, so equality and hashing are
/// plain value comparisons afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Email(String);

impl Email {
    /// Parse and normalize a raw email string.
    ///
    /// # Errors
    /// Returns a validation error if the input is blank, contains non-ASCII
    /// characters or does not look like `local@domain.tld`.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.trim().is_empty() {
            return Err(DomainError::validation("Email cannot be empty"));
        }

        if !raw.is_ascii() || !EMAIL_REGEX.is_match(raw) {
            return Err(DomainError::validation("Invalid email format"));
        }

        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// Normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::parse(&value)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
