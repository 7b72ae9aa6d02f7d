//! User factory - the single place new users are built.

use uuid::Uuid;

use crate::email::Email;
use crate::error::DomainResult;
use crate::hasher::CredentialHasher;
use crate::password::Password;
use crate::user::User;
use crate::validator;

/// Validate inputs, hash the password and build a new active user.
///
/// Names are stored trimmed. The password is consumed and wiped once the
/// credential has been derived.
///
/// # Errors
/// Business-rule errors for invalid names; internal errors if hashing fails.
pub fn create_user(
    first_name: &str,
    last_name: &str,
    email: Email,
    password: Password,
    hasher: &dyn CredentialHasher,
) -> DomainResult<User> {
    validator::validate_user_creation(first_name, last_name, &email, &password)?;

    let credential = hasher.hash(password)?;

    Ok(User::new(
        Uuid::new_v4(),
        first_name.trim().to_string(),
        last_name.trim().to_string(),
        email,
        credential,
    ))
}
