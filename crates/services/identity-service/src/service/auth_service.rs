//! Authentication service - Handles user sign-up.
//!
//! SOLID (SRP): Orchestrates registration only; validation, hashing and
//! storage live in the domain and repository layers.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use common::{AppError, AppResult, FailureKind, OperationResult};
use domain::{
    create_user, CredentialHasher, Email, Password, SignUpRequest, User, UserView,
    EMAIL_EXISTS_MESSAGE,
};

use crate::config::DEFAULT_SIGNUP_TIMEOUT_MS;
use crate::repository::UserRepository;

/// Message returned with a successful sign-up
pub const SIGNUP_SUCCESS_MESSAGE: &str = "User created successfully";

/// Message returned for any failure that is not the caller's fault
pub const SIGNUP_FAILURE_MESSAGE: &str = "An error occurred during sign up";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user.
    ///
    /// Never fails outright: every outcome, including internal errors, is
    /// reported through the returned [`OperationResult`].
    async fn sign_up(&self, request: SignUpRequest) -> OperationResult<UserView>;
}

/// Concrete implementation of AuthService backed by a user repository.
pub struct Registrar {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    deadline: Duration,
}

impl Registrar {
    /// Create new sign-up service with the default deadline
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            repo,
            hasher,
            deadline: Duration::from_millis(DEFAULT_SIGNUP_TIMEOUT_MS),
        }
    }

    /// Bound every sign-up by `deadline`
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    async fn register(&self, request: SignUpRequest) -> AppResult<User> {
        let SignUpRequest {
            first_name,
            last_name,
            email,
            password,
        } = request;

        // Value checks come first so bad input never reaches the store
        let email = Email::parse(&email)?;
        let password = Password::parse(password)?;

        if self.repo.email_exists(&email).await? {
            return Err(AppError::conflict("Email"));
        }

        // Key derivation is CPU-bound; keep it off the async workers
        let hasher = Arc::clone(&self.hasher);
        let user = tokio::task::spawn_blocking(move || {
            create_user(&first_name, &last_name, email, password, hasher.as_ref())
        })
        .await
        .map_err(|e| AppError::internal(format!("User creation task failed: {}", e)))??;

        self.repo.create(user).await
    }

    fn failure(&self, err: AppError) -> OperationResult<UserView> {
        let kind = FailureKind::from(&err);

        match kind {
            FailureKind::Validation => {
                let message = err.user_message();
                debug!(reason = %message, "Sign up rejected");
                OperationResult::failure(kind, message, Vec::new())
            }
            FailureKind::Conflict => {
                warn!("Sign up rejected: email already registered");
                OperationResult::failure(kind, EMAIL_EXISTS_MESSAGE, Vec::new())
            }
            FailureKind::Internal => {
                error!(error = ?err, "Sign up failed");
                OperationResult::failure(kind, SIGNUP_FAILURE_MESSAGE, Vec::new())
            }
        }
    }
}

#[async_trait]
impl AuthService for Registrar {
    async fn sign_up(&self, request: SignUpRequest) -> OperationResult<UserView> {
        match timeout(self.deadline, self.register(request)).await {
            Ok(Ok(user)) => {
                info!(user_id = %user.id(), "User signed up");
                OperationResult::success(UserView::from(&user), SIGNUP_SUCCESS_MESSAGE)
            }
            Ok(Err(err)) => self.failure(err),
            Err(_) => self.failure(AppError::timeout(format!(
                "sign up exceeded {}ms",
                self.deadline.as_millis()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use domain::{DomainError, DomainResult, KdfHasher, KdfParams, StoredCredential};

    // =========================================================================
    // Test Helpers
    // =========================================================================

    fn fast_hasher() -> Arc<dyn CredentialHasher> {
        Arc::new(KdfHasher::new(KdfParams::Pbkdf2Sha256 { iterations: 1_000 }))
    }

    fn request(email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn valid_request() -> SignUpRequest {
        request("Jane.Doe@Example.com", "Str0ng!Pass")
    }

    /// Repository that accepts any new email and echoes created users.
    fn accepting_repo() -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create().returning(Ok);
        repo
    }

    struct FailingHasher;

    impl CredentialHasher for FailingHasher {
        fn hash(&self, _password: Password) -> DomainResult<StoredCredential> {
            Err(DomainError::internal("entropy source unavailable"))
        }

        fn verify(&self, _plaintext: &str, _stored: &StoredCredential) -> bool {
            false
        }
    }

    struct SlowHasher;

    impl CredentialHasher for SlowHasher {
        fn hash(&self, password: Password) -> DomainResult<StoredCredential> {
            std::thread::sleep(Duration::from_millis(300));
            KdfHasher::new(KdfParams::Pbkdf2Sha256 { iterations: 1_000 }).hash(password)
        }

        fn verify(&self, _plaintext: &str, _stored: &StoredCredential) -> bool {
            false
        }
    }

    // =========================================================================
    // Success
    // =========================================================================

    #[tokio::test]
    async fn test_sign_up_success() {
        let service = Registrar::new(Arc::new(accepting_repo()), fast_hasher());

        let result = service.sign_up(valid_request()).await;

        assert!(result.succeeded);
        assert_eq!(result.message, SIGNUP_SUCCESS_MESSAGE);
        assert!(result.errors.is_empty());
        let view = result.value.unwrap();
        assert_eq!(view.email, "jane.doe@example.com");
        assert_eq!(view.first_name, "Jane");
        assert!(view.is_active);
    }

    #[tokio::test]
    async fn test_sign_up_stores_verifiable_credential() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create()
            .withf(|user| {
                let hasher = KdfHasher::default();
                hasher.verify("Str0ng!Pass", user.credential())
                    && !hasher.verify("Wr0ng!Pass", user.credential())
            })
            .times(1)
            .returning(Ok);

        let service = Registrar::new(Arc::new(repo), fast_hasher());
        assert!(service.sign_up(valid_request()).await.succeeded);
    }

    // =========================================================================
    // Rejected input
    // =========================================================================

    #[tokio::test]
    async fn test_short_password_never_touches_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().times(0);
        repo.expect_create().times(0);
        repo.expect_get_by_email().times(0);

        let service = Registrar::new(Arc::new(repo), fast_hasher());
        let result = service
            .sign_up(request("jane@example.com", "short"))
            .await;

        assert!(!result.succeeded);
        assert!(result.value.is_none());
        assert_eq!(result.failure_kind(), Some(FailureKind::Validation));
        assert_eq!(result.message, "Password must be at least 8 characters");
        assert_eq!(result.errors, vec![result.message.clone()]);
    }

    #[tokio::test]
    async fn test_invalid_email_never_touches_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().times(0);
        repo.expect_create().times(0);

        let service = Registrar::new(Arc::new(repo), fast_hasher());
        let result = service.sign_up(request("not-an-email", "Str0ng!Pass")).await;

        assert!(!result.succeeded);
        assert_eq!(result.message, "Invalid email format");
    }

    #[tokio::test]
    async fn test_invalid_name_rejected_before_create() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().times(1).returning(|_| Ok(false));
        repo.expect_create().times(0);

        let service = Registrar::new(Arc::new(repo), fast_hasher());
        let mut req = valid_request();
        req.first_name = " J ".to_string();

        let result = service.sign_up(req).await;

        assert!(!result.succeeded);
        assert_eq!(result.failure_kind(), Some(FailureKind::Validation));
        assert_eq!(result.message, "First name must be at least 2 characters");
    }

    // =========================================================================
    // Duplicates
    // =========================================================================

    #[tokio::test]
    async fn test_existing_email_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists()
            .withf(|email| email.as_str() == "jane.doe@example.com")
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_create().times(0);

        let service = Registrar::new(Arc::new(repo), fast_hasher());
        let result = service.sign_up(valid_request()).await;

        assert!(!result.succeeded);
        assert_eq!(result.failure_kind(), Some(FailureKind::Conflict));
        assert_eq!(result.message, EMAIL_EXISTS_MESSAGE);
    }

    #[tokio::test]
    async fn test_store_conflict_reported_as_duplicate() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create()
            .returning(|_| Err(AppError::conflict("Email")));

        let service = Registrar::new(Arc::new(repo), fast_hasher());
        let result = service.sign_up(valid_request()).await;

        assert_eq!(result.failure_kind(), Some(FailureKind::Conflict));
        assert_eq!(result.message, EMAIL_EXISTS_MESSAGE);
    }

    // =========================================================================
    // Internal failures
    // =========================================================================

    #[tokio::test]
    async fn test_store_failure_hides_details() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create()
            .returning(|_| Err(AppError::internal("disk full at /var/lib/users")));

        let service = Registrar::new(Arc::new(repo), fast_hasher());
        let result = service.sign_up(valid_request()).await;

        assert!(!result.succeeded);
        assert_eq!(result.failure_kind(), Some(FailureKind::Internal));
        assert_eq!(result.message, SIGNUP_FAILURE_MESSAGE);
        assert!(result.errors.iter().all(|e| !e.contains("disk")));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_generic() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists()
            .returning(|_| Err(AppError::internal("connection reset")));
        repo.expect_create().times(0);

        let service = Registrar::new(Arc::new(repo), fast_hasher());
        let result = service.sign_up(valid_request()).await;

        assert_eq!(result.message, SIGNUP_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_hash_failure_is_generic() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create().times(0);

        let service = Registrar::new(Arc::new(repo), Arc::new(FailingHasher));
        let result = service.sign_up(valid_request()).await;

        assert_eq!(result.failure_kind(), Some(FailureKind::Internal));
        assert_eq!(result.message, SIGNUP_FAILURE_MESSAGE);
        assert!(!result.message.contains("entropy"));
    }

    #[tokio::test]
    async fn test_deadline_exceeded_is_generic() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_create().times(0);

        let service = Registrar::new(Arc::new(repo), Arc::new(SlowHasher))
            .with_deadline(Duration::from_millis(20));
        let result = service.sign_up(valid_request()).await;

        assert!(!result.succeeded);
        assert_eq!(result.failure_kind(), Some(FailureKind::Internal));
        assert_eq!(result.message, SIGNUP_FAILURE_MESSAGE);
    }
}
