//! Common utilities shared across the identity crates.
//!
//! This crate provides:
//! - Application error type with HTTP mapping
//! - Operation outcome returned by services
//! - Configuration helpers

pub mod config;
pub mod error;
pub mod result;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use result::{FailureKind, OperationResult};
