//! User validator - business rules for names and creation inputs.

use crate::constants::{MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::email::Email;
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// First name field label used in messages
pub const FIRST_NAME: &str = "First name";

/// Last name field label used in messages
pub const LAST_NAME: &str = "Last name";

/// Check a single name after trimming.
pub fn validate_name(name: &str, field_name: &str) -> DomainResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(DomainError::business_rule(format!(
            "{} cannot be empty",
            field_name
        )));
    }

    let length = trimmed.chars().count();

    if length < MIN_NAME_LENGTH {
        return Err(DomainError::business_rule(format!(
            "{} must be at least {} characters",
            field_name, MIN_NAME_LENGTH
        )));
    }

    if length > MAX_NAME_LENGTH {
        return Err(DomainError::business_rule(format!(
            "{} cannot exceed {} characters",
            field_name, MAX_NAME_LENGTH
        )));
    }

    Ok(())
}

/// Rules applied before a user is created.
///
/// Email and password presence is guaranteed by their types; there is no
/// cross-field rule between them yet.
pub fn validate_user_creation(
    first_name: &str,
    last_name: &str,
    _email: &Email,
    _password: &Password,
) -> DomainResult<()> {
    validate_name(first_name, FIRST_NAME)?;
    validate_name(last_name, LAST_NAME)
}

/// Rules applied before a profile update.
pub fn validate_profile_update(first_name: &str, last_name: &str) -> DomainResult<()> {
    validate_name(first_name, FIRST_NAME)?;
    validate_name(last_name, LAST_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_name("Jo", FIRST_NAME).is_ok());
        assert!(validate_name("  Jane  ", FIRST_NAME).is_ok());
        assert!(validate_name(&"a".repeat(50), LAST_NAME).is_ok());
    }

    #[test]
    fn test_empty_name() {
        let err = validate_name("   ", FIRST_NAME).unwrap_err();
        assert_eq!(err, DomainError::business_rule("First name cannot be empty"));
    }

    #[test]
    fn test_name_too_short_after_trim() {
        let err = validate_name(" J ", LAST_NAME).unwrap_err();
        assert_eq!(
            err,
            DomainError::business_rule("Last name must be at least 2 characters")
        );
    }

    #[test]
    fn test_name_too_long() {
        let err = validate_name(&"a".repeat(51), FIRST_NAME).unwrap_err();
        assert_eq!(
            err,
            DomainError::business_rule("First name cannot exceed 50 characters")
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 50 two-byte characters is still within the limit
        assert!(validate_name(&"é".repeat(50), FIRST_NAME).is_ok());
    }

    #[test]
    fn test_profile_update_checks_both_names() {
        assert!(validate_profile_update("Jane", "Doe").is_ok());
        assert!(validate_profile_update("J", "Doe").is_err());
        assert!(validate_profile_update("Jane", "").is_err());
    }

    #[test]
    fn test_user_creation_checks_names() {
        let email = Email::parse("jane@example.com").unwrap();
        let password = Password::parse("Str0ng!Pass").unwrap();

        assert!(validate_user_creation("Jane", "Doe", &email, &password).is_ok());
        let err = validate_user_creation("Jane", "D", &email, &password).unwrap_err();
        assert_eq!(
            err,
            DomainError::business_rule("Last name must be at least 2 characters")
        );
    }
}
