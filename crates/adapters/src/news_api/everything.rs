//! NewsAPI `/everything` search client

use async_trait::async_trait;
use news_relay_domain::{ArticlePayload, NewsError, NewsSource, SearchRequest};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;

/// NewsAPI client for full-text article search
pub struct NewsApiClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl NewsApiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://newsapi.org/v2";

    pub fn new(api_key: SecretString) -> Self {
        Self::with_base_url(
            api_key,
            Self::DEFAULT_BASE_URL.to_string(),
            Duration::from_secs(30),
        )
    }

    pub fn with_base_url(api_key: SecretString, base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check that the provider accepts the API key with a one-article probe
    pub async fn verify_key(&self) -> Result<(), NewsError> {
        let params = [("q", "test"), ("language", "en"), ("pageSize", "1")];
        self.get_everything(&params).await.map(|_| ())
    }

    async fn get_everything(&self, params: &[(&str, &str)]) -> Result<ArticlePayload, NewsError> {
        let url = format!("{}/everything", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", self.api_key.expose_secret())
            .query(params)
            .send()
            .await
            .map_err(|e| NewsError::Transport(e.to_string()))?;

        let status = response.status();

        // NewsAPI reports failures in the JSON body, including on 4xx responses
        let body: Value = response.json().await.map_err(|e| {
            NewsError::Transport(format!("Undecodable response ({}): {}", status, e))
        })?;

        if body.get("status").and_then(Value::as_str) == Some("ok") {
            return Ok(ArticlePayload(body));
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        let code = body
            .get("code")
            .and_then(Value::as_str)
            .map(str::to_string);

        tracing::warn!(
            http_status = %status,
            code = ?code,
            message = %message,
            "NewsAPI reported an error"
        );

        Err(NewsError::Provider { code, message })
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<ArticlePayload, NewsError> {
        let page_size = request.page_size.to_string();
        let params = [
            ("q", request.query.as_str()),
            ("language", request.language),
            ("sortBy", request.sort_by),
            ("pageSize", page_size.as_str()),
        ];

        tracing::debug!(
            query = %request.query,
            language = request.language,
            sort_by = request.sort_by,
            page_size = request.page_size,
            "Requesting NewsAPI /everything"
        );

        self.get_everything(&params).await
    }
}
