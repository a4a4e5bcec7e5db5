//! Publishing use case

use std::sync::Arc;

use crate::{
    format::format_post,
    model::{PostRequest, PostResult},
    ports::{PublishError, Publisher, UseCaseError, ValidationError},
};

/// Use case for formatting and posting a status update
pub struct PublishUseCase {
    publisher: Arc<dyn Publisher>,
}

impl PublishUseCase {
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self { publisher }
    }

    /// Format the request within the character ceiling and publish it
    pub async fn publish(
        &self,
        request: &PostRequest,
    ) -> Result<PostResult, UseCaseError<PublishError>> {
        if request.text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let post = format_post(&request.text, request.url.as_deref());

        tracing::info!(
            platform = self.publisher.platform(),
            chars = post.char_len(),
            has_url = request.url.as_deref().is_some_and(|u| !u.is_empty()),
            "Publishing post"
        );

        let result = self
            .publisher
            .publish(&post)
            .await
            .map_err(UseCaseError::Upstream)?;

        tracing::info!(id = %result.id, url = %result.url, "Post published");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::POST_CHAR_LIMIT;
    use crate::model::PostText;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakePublisher {
        published: Mutex<Vec<PostText>>,
    }

    #[async_trait]
    impl Publisher for FakePublisher {
        async fn publish(&self, post: &PostText) -> Result<PostResult, PublishError> {
            self.published.lock().unwrap().push(post.clone());
            Ok(PostResult {
                id: "1".to_string(),
                url: "https://twitter.com/i/web/status/1".to_string(),
            })
        }

        fn platform(&self) -> &'static str {
            "fake"
        }
    }

    #[tokio::test]
    async fn test_publish_formats_before_posting() {
        let fake = Arc::new(FakePublisher::default());
        let usecase = PublishUseCase::new(fake.clone());

        let request = PostRequest {
            text: "n".repeat(400),
            url: Some("https://example.com/story".to_string()),
        };
        let result = usecase.publish(&request).await.unwrap();
        assert_eq!(result.id, "1");

        let published = fake.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert!(published[0].char_len() <= POST_CHAR_LIMIT);
        assert!(published[0].as_str().ends_with("... https://example.com/story"));
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_before_formatting() {
        let fake = Arc::new(FakePublisher::default());
        let usecase = PublishUseCase::new(fake.clone());

        let request = PostRequest {
            text: String::new(),
            url: Some("https://example.com".to_string()),
        };
        let result = usecase.publish(&request).await;

        assert!(matches!(
            result,
            Err(UseCaseError::Invalid(ValidationError::EmptyText))
        ));
        assert!(fake.published.lock().unwrap().is_empty());
    }
}
