//! HTTP request handlers.

pub mod auth_handler;
pub mod health_handler;
pub mod home_handler;

pub use auth_handler::auth_routes;
pub use health_handler::health_routes;
pub use home_handler::home_routes;
