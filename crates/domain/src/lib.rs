//! news-relay domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Request-scoped value objects
//! - `ports`: Trait definitions and error enums for the upstream providers
//! - `persona`: Persona prompt registry
//! - `format`: Post formatting within the character ceiling
//! - `usecases`: Validation and dispatch for search, summarize and publish

pub mod format;
pub mod model;
pub mod persona;
pub mod ports;
pub mod usecases;

pub use format::{ELLIPSIS, POST_CHAR_LIMIT, format_post};
pub use model::*;
pub use persona::Persona;
pub use ports::*;
