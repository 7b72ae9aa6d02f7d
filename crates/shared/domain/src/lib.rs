//! Domain layer - identity entities, value objects and rules.
//!
//! Pure domain logic with no infrastructure dependencies. Services build on
//! these types; nothing here knows about storage or transport.

pub mod constants;
pub mod credential;
pub mod email;
pub mod error;
pub mod factory;
pub mod hasher;
pub mod password;
pub mod user;
pub mod validator;

pub use constants::*;
pub use credential::{KdfParams, StoredCredential};
pub use email::Email;
pub use error::{DomainError, DomainResult};
pub use factory::create_user;
pub use hasher::{CredentialHasher, KdfHasher};
pub use password::Password;
pub use user::{SignUpRequest, User, UserView};
