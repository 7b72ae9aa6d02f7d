//! In-memory user store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Email, User};

use super::UserRepository;

/// Process-local store backed by a vector behind an async lock.
///
/// Lookups are linear. `create` and `update` check email uniqueness inside
/// the same write lock that changes the records.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the store holds no users
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email() == email).cloned())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id() == id).cloned())
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.id() == user.id()) {
            return Err(AppError::conflict("User"));
        }
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(AppError::conflict("Email"));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users
            .iter()
            .any(|u| u.id() != user.id() && u.email() == user.email())
        {
            return Err(AppError::conflict("Email"));
        }

        let stored = users
            .iter_mut()
            .find(|u| u.id() == user.id())
            .ok_or_not_found()?;

        stored.apply_changes(&user);
        Ok(stored.clone())
    }

    async fn email_exists(&self, email: &Email) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| u.email() == email))
    }
}
