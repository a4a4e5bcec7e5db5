//! Summarization use case

use std::sync::Arc;

use crate::{
    model::{Summary, SummaryRequest},
    persona::Persona,
    ports::{SummarizeError, Summarizer, UseCaseError, ValidationError},
};

/// Use case for summarizing article text in a persona's voice
pub struct SummarizeUseCase {
    summarizer: Arc<dyn Summarizer>,
}

impl SummarizeUseCase {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self { summarizer }
    }

    /// Summarize `text`; unknown or missing persona ids use the default voice
    pub async fn summarize(
        &self,
        text: &str,
        persona_id: Option<&str>,
    ) -> Result<Summary, UseCaseError<SummarizeError>> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let persona = Persona::resolve(persona_id);

        tracing::info!(
            persona = persona.id(),
            requested = ?persona_id,
            text_chars = text.chars().count(),
            "Summarizing article"
        );

        let request = SummaryRequest {
            persona,
            article: text.to_string(),
        };

        let summary = self
            .summarizer
            .summarize(&request)
            .await
            .map_err(UseCaseError::Upstream)?;

        tracing::debug!(
            summary_chars = summary.text.chars().count(),
            "Generated summary"
        );

        Ok(summary)
    }
}
