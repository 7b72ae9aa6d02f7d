//! User repository contract.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::{Email, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Implementations must be safe to share between concurrent requests.
/// Durable stores must enforce email uniqueness with a storage-level
/// constraint and report a violation as `AppError::Conflict`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by normalized email
    async fn get_by_email(&self, email: &Email) -> AppResult<Option<User>>;

    /// Find user by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Store a new user.
    ///
    /// Fails with `Conflict` when the id or the email is already taken.
    async fn create(&self, user: User) -> AppResult<User>;

    /// Replace the mutable fields of an existing user.
    ///
    /// Fails with `NotFound` when no user has the id and with `Conflict`
    /// when another user already has the new email.
    async fn update(&self, user: User) -> AppResult<User>;

    /// Whether any user has this email
    async fn email_exists(&self, email: &Email) -> AppResult<bool>;
}
