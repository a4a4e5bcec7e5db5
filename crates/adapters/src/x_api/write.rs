//! X API write adapter for publishing posts

use async_trait::async_trait;
use news_relay_domain::{PlatformFailure, PostResult, PostText, PublishError, Publisher};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use time::OffsetDateTime;

use super::oauth::{OAuth1Credentials, OAuth1Signer};

/// X API publisher for creating posts with user-context OAuth 1.0a
pub struct XPublisher {
    client: Client,
    signer: OAuth1Signer,
    base_url: String,
    wait_on_rate_limit: bool,
    max_rate_limit_wait: Duration,
}

impl XPublisher {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.twitter.com";
    pub const PERMALINK_PREFIX: &'static str = "https://twitter.com/i/web/status/";

    pub fn new(credentials: OAuth1Credentials) -> Self {
        Self::with_base_url(credentials, Self::DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(credentials: OAuth1Credentials, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            signer: OAuth1Signer::new(credentials),
            base_url: base_url.trim_end_matches('/').to_string(),
            wait_on_rate_limit: true,
            max_rate_limit_wait: Duration::from_secs(900),
        }
    }

    /// Configure whether a 429 is waited out (up to `max_wait`) and re-sent once
    pub fn with_rate_limit_wait(mut self, enabled: bool, max_wait: Duration) -> Self {
        self.wait_on_rate_limit = enabled;
        self.max_rate_limit_wait = max_wait;
        self
    }

    /// Permalink for a post ID
    pub fn permalink(id: &str) -> String {
        format!("{}{}", Self::PERMALINK_PREFIX, id)
    }

    async fn send(
        &self,
        url: &str,
        request: &CreateTweetRequest<'_>,
    ) -> Result<Response, PublishError> {
        let authorization = self.signer.authorize("POST", url, &[]);

        self.client
            .post(url)
            .header("Authorization", authorization)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))
    }

    /// How long to sleep before retrying a rate-limited request, if at all
    fn rate_limit_wait(&self, response: &Response) -> Option<Duration> {
        if !self.wait_on_rate_limit {
            return None;
        }

        let reset = response
            .headers()
            .get("x-rate-limit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let wait = Duration::from_secs(reset.saturating_sub(now).max(0) as u64);

        Some(wait.min(self.max_rate_limit_wait))
    }
}

#[derive(Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct CreateTweetResponse {
    data: Option<TweetData>,
}

#[derive(Deserialize)]
struct TweetData {
    id: String,
}

/// Extract error codes and messages from a v2 or v1.1 style error body
fn parse_failure(status: StatusCode, body: String) -> PlatformFailure {
    let mut api_codes = Vec::new();
    let mut api_messages = Vec::new();

    if let Ok(json) = serde_json::from_str::<Value>(&body) {
        if let Some(errors) = json.get("errors").and_then(Value::as_array) {
            for error in errors {
                if let Some(code) = error.get("code").and_then(Value::as_i64) {
                    api_codes.push(code);
                }
                if let Some(message) = error.get("message").and_then(Value::as_str) {
                    api_messages.push(message.to_string());
                }
            }
        }

        if api_messages.is_empty() {
            let fallback = json
                .get("detail")
                .or_else(|| json.get("title"))
                .and_then(Value::as_str);
            if let Some(message) = fallback {
                api_messages.push(message.to_string());
            }
        }
    }

    PlatformFailure {
        status: status.as_u16(),
        body,
        api_codes,
        api_messages,
    }
}

#[async_trait]
impl Publisher for XPublisher {
    async fn publish(&self, post: &PostText) -> Result<PostResult, PublishError> {
        let url = format!("{}/2/tweets", self.base_url);
        let request = CreateTweetRequest {
            text: post.as_str(),
        };

        let mut response = self.send(&url, &request).await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            if let Some(wait) = self.rate_limit_wait(&response) {
                tracing::warn!(
                    wait_secs = wait.as_secs(),
                    "Rate limited by X, waiting before retrying"
                );
                tokio::time::sleep(wait).await;
                response = self.send(&url, &request).await?;
            }
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let failure = parse_failure(status, body);

            tracing::warn!(
                status = failure.status,
                api_codes = ?failure.api_codes,
                api_messages = ?failure.api_messages,
                "X rejected post"
            );

            return Err(match status {
                StatusCode::UNAUTHORIZED => PublishError::Unauthorized(failure),
                StatusCode::FORBIDDEN => PublishError::Forbidden(failure),
                StatusCode::TOO_MANY_REQUESTS => PublishError::RateLimited(failure),
                _ => PublishError::Http(failure),
            });
        }

        let tweet_response: CreateTweetResponse = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidResponse(e.to_string()))?;

        let data = tweet_response
            .data
            .ok_or_else(|| PublishError::InvalidResponse("Response has no data".to_string()))?;

        Ok(PostResult {
            url: Self::permalink(&data.id),
            id: data.id,
        })
    }

    fn platform(&self) -> &'static str {
        "x"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use news_relay_domain::format_post;
    use secrecy::SecretString;
    use wiremock::matchers::{body_json, header, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> OAuth1Credentials {
        OAuth1Credentials {
            consumer_key: SecretString::new("consumer-key".into()),
            consumer_secret: SecretString::new("consumer-secret".into()),
            access_token: SecretString::new("access-token".into()),
            access_token_secret: SecretString::new("access-secret".into()),
        }
    }

    fn sample_post() -> PostText {
        format_post("Markets rally on rate cut 📈", Some("https://example.com/a"))
    }

    fn publisher(base_url: String) -> XPublisher {
        XPublisher::with_base_url(credentials(), base_url)
            .with_rate_limit_wait(false, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_publish_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .and(header_regex(
                "Authorization",
                r#"^OAuth .*oauth_consumer_key="consumer-key".*oauth_signature="#,
            ))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({
                "text": "Markets rally on rate cut 📈 https://example.com/a"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": {
                    "id": "12345",
                    "text": "Markets rally on rate cut 📈 https://t.co/abc"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = publisher(mock_server.uri())
            .publish(&sample_post())
            .await
            .unwrap();

        assert_eq!(result.id, "12345");
        assert_eq!(result.url, "https://twitter.com/i/web/status/12345");
    }

    #[tokio::test]
    async fn test_publish_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "title": "Unauthorized",
                "type": "about:blank",
                "status": 401,
                "detail": "Unauthorized"
            })))
            .mount(&mock_server)
            .await;

        let result = publisher(mock_server.uri()).publish(&sample_post()).await;

        match result {
            Err(PublishError::Unauthorized(failure)) => {
                assert_eq!(failure.status, 401);
                assert_eq!(failure.api_messages, vec!["Unauthorized"]);
                assert!(failure.body.contains("about:blank"));
            }
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_forbidden_with_error_codes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "errors": [{
                    "code": 453,
                    "message": "You currently have access to a subset of X API endpoints only."
                }]
            })))
            .mount(&mock_server)
            .await;

        let result = publisher(mock_server.uri()).publish(&sample_post()).await;

        match result {
            Err(PublishError::Forbidden(failure)) => {
                assert_eq!(failure.api_codes, vec![453]);
                assert_eq!(failure.api_messages.len(), 1);
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_rate_limited_without_wait() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(429).insert_header("x-rate-limit-reset", "0"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = publisher(mock_server.uri()).publish(&sample_post()).await;

        assert!(matches!(result, Err(PublishError::RateLimited(_))));
    }

    #[tokio::test]
    async fn test_publish_waits_out_rate_limit_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(429).insert_header("x-rate-limit-reset", "0"))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": {"id": "777", "text": "ok"}
            })))
            .mount(&mock_server)
            .await;

        let publisher = XPublisher::with_base_url(credentials(), mock_server.uri())
            .with_rate_limit_wait(true, Duration::from_secs(1));

        let result = publisher.publish(&sample_post()).await.unwrap();
        assert_eq!(result.id, "777");
    }

    #[tokio::test]
    async fn test_publish_other_status_is_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errors": [{"message": "Your Tweet text is too long."}],
                "title": "Invalid Request"
            })))
            .mount(&mock_server)
            .await;

        let result = publisher(mock_server.uri()).publish(&sample_post()).await;

        match result {
            Err(PublishError::Http(failure)) => {
                assert_eq!(failure.status, 400);
                assert_eq!(failure.api_messages, vec!["Your Tweet text is too long."]);
            }
            other => panic!("expected Http, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_missing_data_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let result = publisher(mock_server.uri()).publish(&sample_post()).await;

        assert!(matches!(result, Err(PublishError::InvalidResponse(_))));
    }
}
