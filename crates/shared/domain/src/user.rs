//! User domain entity and related types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::credential::StoredCredential;
use crate::email::Email;
use crate::error::DomainResult;
use crate::validator;

/// User domain entity.
///
/// New users are built by [`crate::factory::create_user`] and storage
/// adapters rebuild persisted ones with [`User::restore`]. State changes go
/// through the named operations below.
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: Email,
    credential: StoredCredential,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_active: bool,
}

impl User {
    /// Create a new active user
    pub(crate) fn new(
        id: Uuid,
        first_name: String,
        last_name: String,
        email: Email,
        credential: StoredCredential,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            credential,
            created_at: Utc::now(),
            updated_at: None,
            is_active: true,
        }
    }

    /// Rebuild a user from persisted state.
    ///
    /// For storage adapters only. The credential must come from a stored
    /// record; new users go through [`crate::factory::create_user`], which
    /// remains the only place a credential is derived.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        first_name: String,
        last_name: String,
        email: Email,
        credential: StoredCredential,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            credential,
            created_at,
            updated_at,
            is_active,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored hash and salt. Never part of any outward-facing view.
    pub fn credential(&self) -> &StoredCredential {
        &self.credential
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Update first and last name after validating them.
    pub fn update_profile(&mut self, first_name: &str, last_name: &str) -> DomainResult<()> {
        validator::validate_profile_update(first_name, last_name)?;
        self.first_name = first_name.trim().to_string();
        self.last_name = last_name.trim().to_string();
        self.touch();
        Ok(())
    }

    /// Re-enable the account
    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    /// Disable the account without removing it
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    /// Copy the mutable fields of `changes` into this record.
    ///
    /// Used by stores when persisting an update; id, credential and
    /// creation time are kept from `self`.
    pub fn apply_changes(&mut self, changes: &User) {
        self.first_name = changes.first_name.clone();
        self.last_name = changes.last_name.clone();
        self.email = changes.email.clone();
        self.is_active = changes.is_active;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Sign-up request as received from a caller
#[derive(Clone)]
pub struct SignUpRequest {
    /// Given name (2-50 characters)
    pub first_name: String,
    /// Family name (2-50 characters)
    pub last_name: String,
    /// Email address, compared case-insensitively
    pub email: String,
    /// Password: 8+ characters with upper, lower, digit and one of @$!%*?&
    pub password: String,
}

// Don't expose the password in debug output (security)
impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User view (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// Unique user identifier
    pub id: Uuid,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Normalized (lower-cased) email address
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Whether the account is active
    pub is_active: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            is_active: user.is_active,
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView::from(&user)
    }
}
