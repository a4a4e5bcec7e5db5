//! NewsAPI adapters

mod everything;

pub use everything::NewsApiClient;

use async_trait::async_trait;
use news_relay_domain::{ArticlePayload, NewsError, NewsSource, SearchRequest};
use std::sync::Mutex;

/// Stub news source for testing
pub struct StubNewsSource {
    response: Result<ArticlePayload, NewsError>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl StubNewsSource {
    /// Create a stub that returns an empty, successful result
    pub fn empty() -> Self {
        Self::with_payload(serde_json::json!({
            "status": "ok",
            "totalResults": 0,
            "articles": []
        }))
    }

    /// Create a stub that returns the given payload
    pub fn with_payload(payload: serde_json::Value) -> Self {
        Self {
            response: Ok(ArticlePayload(payload)),
            requests: Mutex::new(vec![]),
        }
    }

    /// Create a stub that always fails
    pub fn with_error(error: NewsError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(vec![]),
        }
    }

    /// Get all requests the stub received
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSource for StubNewsSource {
    async fn search(&self, request: &SearchRequest) -> Result<ArticlePayload, NewsError> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.clone()
    }
}
