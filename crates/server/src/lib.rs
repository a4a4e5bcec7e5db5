//! news-relay server library
//!
//! Exposes the HTTP router, configuration and credential loading so the
//! binary and the integration tests build the service the same way.

pub mod app;
pub mod config;
pub mod credentials;
pub mod error;

pub use app::{AppState, router};
pub use config::AppConfig;
pub use credentials::Credentials;
pub use error::ApiError;
