//! X (Twitter) API adapters

mod oauth;
mod write;

pub use oauth::{OAuth1Credentials, OAuth1Signer};
pub use write::XPublisher;

use async_trait::async_trait;
use news_relay_domain::{PostResult, PostText, PublishError, Publisher};

/// Stub X publisher for testing
pub struct StubXPublisher {
    error: Option<PublishError>,
    next_id: String,
    published: std::sync::Mutex<Vec<PostText>>,
}

impl StubXPublisher {
    /// Create a stub that accepts every post and assigns `id`
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            error: None,
            next_id: id.into(),
            published: std::sync::Mutex::new(vec![]),
        }
    }

    /// Create a stub that rejects every post
    pub fn with_error(error: PublishError) -> Self {
        Self {
            error: Some(error),
            next_id: String::new(),
            published: std::sync::Mutex::new(vec![]),
        }
    }

    /// Get all posts that were published
    pub fn get_published(&self) -> Vec<PostText> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for StubXPublisher {
    async fn publish(&self, post: &PostText) -> Result<PostResult, PublishError> {
        if let Some(ref error) = self.error {
            return Err(error.clone());
        }

        self.published.lock().unwrap().push(post.clone());

        Ok(PostResult {
            id: self.next_id.clone(),
            url: XPublisher::permalink(&self.next_id),
        })
    }

    fn platform(&self) -> &'static str {
        "x"
    }
}
