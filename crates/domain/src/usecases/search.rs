//! News search use case

use std::sync::Arc;

use crate::{
    model::{ArticlePayload, SearchQuery, SearchRequest},
    ports::{NewsError, NewsSource, UseCaseError},
};

/// Use case for forwarding a search to the news provider
pub struct SearchUseCase {
    source: Arc<dyn NewsSource>,
}

impl SearchUseCase {
    pub fn new(source: Arc<dyn NewsSource>) -> Self {
        Self { source }
    }

    /// Search for articles matching `query`
    pub async fn search(&self, query: &str) -> Result<ArticlePayload, UseCaseError<NewsError>> {
        let query = SearchQuery::parse(query)?;
        let request = SearchRequest::new(query);

        tracing::info!(query = %request.query, "Searching news");

        let payload = self
            .source
            .search(&request)
            .await
            .map_err(UseCaseError::Upstream)?;

        if let Some(count) = payload.article_count() {
            tracing::debug!(count, "News search returned articles");
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ValidationError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSource {
        requests: Mutex<Vec<SearchRequest>>,
    }

    #[async_trait]
    impl NewsSource for RecordingSource {
        async fn search(&self, request: &SearchRequest) -> Result<ArticlePayload, NewsError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(ArticlePayload(serde_json::json!({
                "status": "ok",
                "totalResults": 1,
                "articles": [{"title": "Rust 2024 released"}]
            })))
        }
    }

    #[tokio::test]
    async fn test_search_forwards_fixed_params() {
        let source = Arc::new(RecordingSource::default());
        let usecase = SearchUseCase::new(source.clone());

        let payload = usecase.search("rust").await.unwrap();
        assert_eq!(payload.article_count(), Some(1));

        let requests = source.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query.as_str(), "rust");
        assert_eq!(requests[0].language, "en");
        assert_eq!(requests[0].page_size, 10);
    }

    #[tokio::test]
    async fn test_empty_query_never_reaches_source() {
        let source = Arc::new(RecordingSource::default());
        let usecase = SearchUseCase::new(source.clone());

        let result = usecase.search("").await;
        assert!(matches!(
            result,
            Err(UseCaseError::Invalid(ValidationError::EmptyQuery))
        ));
        assert!(source.requests.lock().unwrap().is_empty());
    }
}
