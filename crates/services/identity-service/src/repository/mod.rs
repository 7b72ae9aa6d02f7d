//! Repository layer - User persistence.

pub mod in_memory;
pub mod user_repository;

pub use in_memory::InMemoryUserRepository;
pub use user_repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
