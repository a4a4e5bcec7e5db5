//! HTTP error mapping
//!
//! Every failure a handler can produce ends up here as an [`ApiError`],
//! which picks the status code and the JSON body the browser client expects.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use news_relay_domain::{NewsError, PublishError, SummarizeError, UseCaseError, ValidationError};
use serde_json::{Value, json};
use thiserror::Error;

const FORBIDDEN_GUIDANCE: &str = "Posting to this endpoint may require additional configuration \
in the X Developer Portal (check that the app has Read and Write permissions).";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("NewsAPI Error: {0}")]
    News(NewsError),
    #[error("OpenAI API error: {0}")]
    Summarize(SummarizeError),
    #[error("X API error: {0}")]
    Publish(PublishError),
}

impl From<UseCaseError<NewsError>> for ApiError {
    fn from(err: UseCaseError<NewsError>) -> Self {
        match err {
            UseCaseError::Invalid(e) => Self::Validation(e),
            UseCaseError::Upstream(e) => Self::News(e),
        }
    }
}

impl From<UseCaseError<SummarizeError>> for ApiError {
    fn from(err: UseCaseError<SummarizeError>) -> Self {
        match err {
            UseCaseError::Invalid(e) => Self::Validation(e),
            UseCaseError::Upstream(e) => Self::Summarize(e),
        }
    }
}

impl From<UseCaseError<PublishError>> for ApiError {
    fn from(err: UseCaseError<PublishError>) -> Self {
        match err {
            UseCaseError::Invalid(e) => Self::Validation(e),
            UseCaseError::Upstream(e) => Self::Publish(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::MalformedBody(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(ValidationError::MalformedQuery(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::News(NewsError::Provider { .. }) => StatusCode::BAD_REQUEST,
            Self::News(NewsError::Transport(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Summarize(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Publish(PublishError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            Self::Publish(PublishError::Forbidden(_)) => StatusCode::FORBIDDEN,
            Self::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::News(NewsError::Transport(msg)) => format!("Error fetching news: {}", msg),
            other => other.to_string(),
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            Self::Validation(_) | Self::News(_) => None,
            Self::Summarize(e) => Some(json!({
                "error_type": e.kind(),
                "error_args": e.args(),
            })),
            Self::Publish(PublishError::Unauthorized(failure)) => Some(json!({
                "status_code": failure.status,
                "error_text": failure.body,
                "api_code": failure.api_codes.first(),
                "api_messages": failure.api_messages,
            })),
            Self::Publish(e @ PublishError::Forbidden(_)) => Some(json!({
                "error_type": e.kind(),
                "error_args": e.args(),
                "message": FORBIDDEN_GUIDANCE,
            })),
            Self::Publish(e) => Some(json!({
                "error_type": e.kind(),
                "error_args": e.args(),
            })),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = match self.details() {
            Some(details) => json!({ "error": message, "details": details }),
            None => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}
