//! Stub summarizer for testing and offline mode

use async_trait::async_trait;
use news_relay_domain::{Persona, SummarizeError, Summarizer, Summary, SummaryRequest};
use std::sync::Mutex;

/// Stub summarizer that returns configurable responses
pub struct StubSummarizer {
    response: Option<Result<Summary, SummarizeError>>,
    seen: Mutex<Vec<Persona>>,
}

impl StubSummarizer {
    /// Create a stub that always returns `text`
    pub fn with_summary(text: impl Into<String>) -> Self {
        Self {
            response: Some(Ok(Summary::new(text))),
            seen: Mutex::new(vec![]),
        }
    }

    /// Create a stub that always returns an error
    pub fn with_error(error: SummarizeError) -> Self {
        Self {
            response: Some(Err(error)),
            seen: Mutex::new(vec![]),
        }
    }

    /// Create a stub that echoes the persona and the start of the article
    pub fn echo() -> Self {
        Self {
            response: None,
            seen: Mutex::new(vec![]),
        }
    }

    /// Personas of every request received so far
    pub fn seen_personas(&self) -> Vec<Persona> {
        self.seen.lock().unwrap().clone()
    }
}

impl Default for StubSummarizer {
    fn default() -> Self {
        Self::echo()
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<Summary, SummarizeError> {
        self.seen.lock().unwrap().push(request.persona);

        if let Some(ref response) = self.response {
            return response.clone();
        }

        let head: String = request.article.chars().take(100).collect();
        Ok(Summary::new(format!("[{}] {}", request.persona.id(), head)))
    }
}
