//! OpenAI chat-completions adapter
//!
//! Works against any OpenAI-compatible `/chat/completions` endpoint.

use async_trait::async_trait;
use news_relay_domain::{SummarizeError, Summarizer, Summary, SummaryRequest};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{LlmConfig, error_message};

/// Summarizer backed by a chat-completion model
pub struct OpenAiSummarizer {
    client: Client,
    api_key: SecretString,
    base_url: String,
    config: LlmConfig,
}

impl OpenAiSummarizer {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    pub fn new(api_key: SecretString, config: LlmConfig) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL.to_string(), config)
    }

    pub fn with_base_url(api_key: SecretString, base_url: String, config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        }
    }

    async fn call_api(
        &self,
        system_prompt: &str,
        article: &str,
    ) -> Result<String, SummarizeError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: article.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_output_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SummarizeError::Timeout
                } else {
                    SummarizeError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            return Err(match status {
                StatusCode::UNAUTHORIZED => SummarizeError::Authentication(message),
                StatusCode::FORBIDDEN => SummarizeError::PermissionDenied(message),
                StatusCode::TOO_MANY_REQUESTS => SummarizeError::RateLimited(message),
                _ => SummarizeError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let api_response: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                SummarizeError::Timeout
            } else {
                SummarizeError::InvalidResponse(e.to_string())
            }
        })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SummarizeError::InvalidResponse("No completion choices".to_string()))?;

        choice.message.content.ok_or_else(|| {
            SummarizeError::InvalidResponse("Completion has no content".to_string())
        })
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<Summary, SummarizeError> {
        tracing::debug!(
            model = %self.config.model,
            persona = request.persona.id(),
            "Creating chat completion"
        );

        let text = self
            .call_api(request.persona.prompt(), &request.article)
            .await
            .inspect_err(|e| {
                tracing::warn!(error = %e, kind = e.kind(), "Chat completion failed")
            })?;

        let text = text.trim();
        if text.is_empty() {
            return Err(SummarizeError::InvalidResponse("Empty response".to_string()));
        }

        Ok(Summary::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use news_relay_domain::Persona;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request(persona: Persona) -> SummaryRequest {
        SummaryRequest {
            persona,
            article: "The central bank raised rates by 25 basis points.".to_string(),
        }
    }

    fn summarizer(base_url: String) -> OpenAiSummarizer {
        OpenAiSummarizer::with_base_url(
            SecretString::new("test-key".into()),
            base_url,
            LlmConfig::default(),
        )
    }

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_summarize_success_trims_first_choice() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 200,
                "messages": [
                    {"role": "system", "content": Persona::Investor.prompt()},
                    {"role": "user", "content": "The central bank raised rates by 25 basis points."}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("\n  Rates up 📈  \n")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let summary = summarizer(mock_server.uri())
            .summarize(&sample_request(Persona::Investor))
            .await
            .unwrap();

        assert_eq!(summary.text, "Rates up 📈");
    }

    #[tokio::test]
    async fn test_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key"
                }
            })))
            .mount(&mock_server)
            .await;

        let result = summarizer(mock_server.uri())
            .summarize(&sample_request(Persona::Default))
            .await;

        assert_eq!(
            result,
            Err(SummarizeError::Authentication(
                "Incorrect API key provided".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_rate_limited_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = summarizer(mock_server.uri())
            .summarize(&sample_request(Persona::Default))
            .await;

        assert!(matches!(result, Err(SummarizeError::RateLimited(_))));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let result = summarizer(mock_server.uri())
            .summarize(&sample_request(Persona::Default))
            .await;

        assert_eq!(
            result,
            Err(SummarizeError::Api {
                status: 503,
                message: "Service Unavailable".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_no_choices_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&mock_server)
            .await;

        let result = summarizer(mock_server.uri())
            .summarize(&sample_request(Persona::Default))
            .await;

        assert_eq!(
            result,
            Err(SummarizeError::InvalidResponse(
                "No completion choices".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_null_content_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": null},
                    "finish_reason": "content_filter"
                }]
            })))
            .mount(&mock_server)
            .await;

        let result = summarizer(mock_server.uri())
            .summarize(&sample_request(Persona::Default))
            .await;

        assert_eq!(
            result,
            Err(SummarizeError::InvalidResponse(
                "Completion has no content".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let result = summarizer("http://127.0.0.1:1".to_string())
            .summarize(&sample_request(Persona::Default))
            .await;

        assert!(matches!(result, Err(SummarizeError::Connection(_))));
    }
}
