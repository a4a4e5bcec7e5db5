//! Credential loading from the process environment
//!
//! Secrets come from fixed environment variable names, never from the
//! config file. Values are trimmed and one layer of stray quoting is removed
//! so that `.env` entries like `KEY="abc"` work as expected.

use news_relay_adapters::x::OAuth1Credentials;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const TWITTER_API_KEY: &str = "TWITTER_API_KEY";
pub const TWITTER_API_SECRET: &str = "TWITTER_API_SECRET";
pub const TWITTER_ACCESS_TOKEN: &str = "TWITTER_ACCESS_TOKEN";
pub const TWITTER_ACCESS_TOKEN_SECRET: &str = "TWITTER_ACCESS_TOKEN_SECRET";
pub const TWITTER_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";

/// Variables that must be set for the server to start
pub const REQUIRED: [&str; 6] = [
    OPENAI_API_KEY,
    NEWS_API_KEY,
    TWITTER_API_KEY,
    TWITTER_API_SECRET,
    TWITTER_ACCESS_TOKEN,
    TWITTER_ACCESS_TOKEN_SECRET,
];

/// Variables that are reported when present but not required
pub const OPTIONAL: [&str; 1] = [TWITTER_BEARER_TOKEN];

/// Missing or invalid startup credential
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Environment variable {0} is not set")]
    Missing(String),
    #[error("Environment variable {0} is empty")]
    Empty(String),
}

/// All secrets needed by the upstream clients
pub struct Credentials {
    pub openai_api_key: SecretString,
    pub news_api_key: SecretString,
    pub twitter: OAuth1Credentials,
    pub twitter_bearer_token: Option<SecretString>,
}

impl Credentials {
    /// Load every credential from the process environment
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(env_lookup)
    }

    /// Load every credential through `lookup`, failing on the first missing one
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigurationError> {
        let twitter_bearer_token = match load_from(TWITTER_BEARER_TOKEN, &lookup) {
            Ok(token) => Some(token),
            Err(ConfigurationError::Missing(_)) | Err(ConfigurationError::Empty(_)) => None,
        };

        Ok(Self {
            openai_api_key: load_from(OPENAI_API_KEY, &lookup)?,
            news_api_key: load_from(NEWS_API_KEY, &lookup)?,
            twitter: OAuth1Credentials {
                consumer_key: load_from(TWITTER_API_KEY, &lookup)?,
                consumer_secret: load_from(TWITTER_API_SECRET, &lookup)?,
                access_token: load_from(TWITTER_ACCESS_TOKEN, &lookup)?,
                access_token_secret: load_from(TWITTER_ACCESS_TOKEN_SECRET, &lookup)?,
            },
            twitter_bearer_token,
        })
    }

    /// Log the first characters of each credential for troubleshooting
    pub fn log_masked(&self) {
        tracing::debug!(
            openai_api_key = %mask(&self.openai_api_key),
            news_api_key = %mask(&self.news_api_key),
            twitter_api_key = %mask(&self.twitter.consumer_key),
            twitter_api_secret = %mask(&self.twitter.consumer_secret),
            twitter_access_token = %mask(&self.twitter.access_token),
            twitter_access_token_secret = %mask(&self.twitter.access_token_secret),
            twitter_bearer_token = %self
                .twitter_bearer_token
                .as_ref()
                .map(mask)
                .unwrap_or_else(|| "(not set)".to_string()),
            "Loaded credentials"
        );
    }
}

/// Read one credential from the process environment
pub fn load(name: &str) -> Result<SecretString, ConfigurationError> {
    load_from(name, env_lookup)
}

/// Read one credential through `lookup`
pub fn load_from(
    name: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigurationError> {
    let raw = lookup(name).ok_or_else(|| ConfigurationError::Missing(name.to_string()))?;

    let value = clean_value(&raw);
    if value.is_empty() {
        return Err(ConfigurationError::Empty(name.to_string()));
    }

    Ok(SecretString::new(value.into()))
}

/// Trim whitespace and one layer of matching surrounding quotes
pub fn clean_value(raw: &str) -> &str {
    let value = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    value
}

/// First five characters followed by an ellipsis
pub fn mask(secret: &SecretString) -> String {
    let head: String = secret.expose_secret().chars().take(5).collect();
    format!("{}...", head)
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
