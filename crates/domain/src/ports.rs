//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and the three
//! upstream providers. Adapters implement them over HTTP; every failure is
//! reported as a closed, per-provider error enum.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ArticlePayload, PostResult, PostText, SearchRequest, Summary, SummaryRequest};

/// Caller input rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Search query is required")]
    EmptyQuery,
    #[error("Text is empty")]
    EmptyText,
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
}

/// Error from a use case: either the input was invalid or the provider failed
#[derive(Debug, Error)]
pub enum UseCaseError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Upstream(E),
}

/// Error type for news search operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsError {
    /// Provider answered but reported a non-"ok" status
    #[error("{message}")]
    Provider {
        code: Option<String>,
        message: String,
    },
    /// Connection failure or an undecodable response
    #[error("{0}")]
    Transport(String),
}

/// Port for searching news articles
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Run one search and return the provider payload verbatim
    async fn search(&self, request: &SearchRequest) -> Result<ArticlePayload, NewsError>;
}

/// Error type for summarization operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizeError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Rate limited: {0}")]
    RateLimited(String),
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Request timed out")]
    Timeout,
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl SummarizeError {
    /// Machine-readable error type reported to HTTP clients
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "authentication_error",
            Self::PermissionDenied(_) => "permission_denied_error",
            Self::RateLimited(_) => "rate_limit_error",
            Self::Api { .. } => "api_status_error",
            Self::Timeout => "timeout_error",
            Self::Connection(_) => "connection_error",
            Self::InvalidResponse(_) => "invalid_response_error",
        }
    }

    /// Upstream arguments, for client-side debugging
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Authentication(msg)
            | Self::PermissionDenied(msg)
            | Self::RateLimited(msg)
            | Self::Connection(msg)
            | Self::InvalidResponse(msg) => vec![msg.clone()],
            Self::Api { status, message } => vec![status.to_string(), message.clone()],
            Self::Timeout => vec![],
        }
    }
}

/// Port for LLM-based summarization
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize an article in the requested persona's voice
    async fn summarize(&self, request: &SummaryRequest) -> Result<Summary, SummarizeError>;
}

/// Details of a failed platform response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformFailure {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
    /// Platform error codes, if the body carried any
    pub api_codes: Vec<i64>,
    /// Platform error messages, if the body carried any
    pub api_messages: Vec<String>,
}

impl std::fmt::Display for PlatformFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.api_messages.is_empty() {
            write!(f, "{}", self.status)
        } else {
            write!(f, "{} {}", self.status, self.api_messages.join("; "))
        }
    }
}

/// Error type for publisher operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("Unauthorized: {0}")]
    Unauthorized(PlatformFailure),
    #[error("Forbidden: {0}")]
    Forbidden(PlatformFailure),
    #[error("Too many requests: {0}")]
    RateLimited(PlatformFailure),
    #[error("HTTP error: {0}")]
    Http(PlatformFailure),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl PublishError {
    /// Machine-readable error type reported to HTTP clients
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::RateLimited(_) => "too_many_requests",
            Self::Http(_) => "http_error",
            Self::Transport(_) => "transport_error",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }

    /// The platform response, when the failure came from one
    pub fn failure(&self) -> Option<&PlatformFailure> {
        match self {
            Self::Unauthorized(f) | Self::Forbidden(f) | Self::RateLimited(f) | Self::Http(f) => {
                Some(f)
            }
            Self::Transport(_) | Self::InvalidResponse(_) => None,
        }
    }

    /// Upstream arguments, for client-side debugging
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Transport(msg) | Self::InvalidResponse(msg) => vec![msg.clone()],
            _ => match self.failure() {
                Some(f) => {
                    let mut args = vec![f.status.to_string()];
                    args.extend(f.api_messages.iter().cloned());
                    args
                }
                None => vec![],
            },
        }
    }
}

/// Port for publishing a status update
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish formatted text, returning the platform ID and permalink
    async fn publish(&self, post: &PostText) -> Result<PostResult, PublishError>;

    /// Get the platform name (e.g., "x")
    fn platform(&self) -> &'static str;
}
