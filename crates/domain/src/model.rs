//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::persona::Persona;
use crate::ports::ValidationError;

/// A validated, non-empty news search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Accept any query with at least one non-whitespace character
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A search query together with the fixed provider parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: SearchQuery,
    /// ISO-639-1 language filter
    pub language: &'static str,
    /// Provider sort order
    pub sort_by: &'static str,
    /// Number of articles per page
    pub page_size: u32,
}

impl SearchRequest {
    pub const LANGUAGE: &'static str = "en";
    pub const SORT_BY: &'static str = "publishedAt";
    pub const PAGE_SIZE: u32 = 10;

    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            language: Self::LANGUAGE,
            sort_by: Self::SORT_BY,
            page_size: Self::PAGE_SIZE,
        }
    }
}

/// Raw provider payload, passed through to the caller untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticlePayload(pub serde_json::Value);

impl ArticlePayload {
    /// Number of entries in the `articles` array, if the payload has one
    pub fn article_count(&self) -> Option<usize> {
        self.0
            .get("articles")
            .and_then(|a| a.as_array())
            .map(|a| a.len())
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

/// Input for a summarization call
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    /// Voice used for the system prompt
    pub persona: Persona,
    /// Article text sent as the user message
    pub article: String,
}

/// Generated summary text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
}

impl Summary {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Caller-supplied post content
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub text: String,
    /// Link appended after the text; empty strings are treated as absent
    #[serde(default)]
    pub url: Option<String>,
}

/// Final, length-bounded text submitted to the social platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostText(String);

impl PostText {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, which is how the platform counts
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for PostText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a successful post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResult {
    /// Platform-assigned post ID
    pub id: String,
    /// Permalink to the post
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_rejects_blank() {
        assert!(matches!(
            SearchQuery::parse(""),
            Err(ValidationError::EmptyQuery)
        ));
        assert!(matches!(
            SearchQuery::parse("   "),
            Err(ValidationError::EmptyQuery)
        ));
    }

    #[test]
    fn test_search_request_fixed_params() {
        let request = SearchRequest::new(SearchQuery::parse("rust").unwrap());
        assert_eq!(request.query.as_str(), "rust");
        assert_eq!(request.language, "en");
        assert_eq!(request.sort_by, "publishedAt");
        assert_eq!(request.page_size, 10);
    }

    #[test]
    fn test_article_count() {
        let payload = ArticlePayload(serde_json::json!({
            "status": "ok",
            "articles": [{"title": "a"}, {"title": "b"}]
        }));
        assert_eq!(payload.article_count(), Some(2));

        let empty = ArticlePayload(serde_json::json!({"status": "ok"}));
        assert_eq!(empty.article_count(), None);
    }

    #[test]
    fn test_post_request_defaults() {
        let request: PostRequest = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(request.text, "hi");
        assert!(request.url.is_none());
    }
}
