//! news-relay adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `news`: NewsAPI search client
//! - `llm`: OpenAI-compatible chat-completion summarizer
//! - `x`: X (Twitter) API publisher with OAuth 1.0a signing
//!
//! Each port also has a stub implementation for tests and offline use.

pub mod llm;
pub mod news_api;
pub mod x_api;

/// Re-exports for news adapters
pub mod news {
    pub use crate::news_api::{NewsApiClient, StubNewsSource};
}

/// Re-exports for X API adapters
pub mod x {
    pub use crate::x_api::{OAuth1Credentials, StubXPublisher, XPublisher};
}
