//! Configuration loading and management

use anyhow::{Context, Result};
use news_relay_adapters::llm::LlmConfig as AdapterLlmConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub news: NewsConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub x: XConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_news_base_url")]
    pub base_url: String,

    #[serde(default = "default_news_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_true")]
    pub verify_key_on_startup: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XConfig {
    #[serde(default = "default_x_base_url")]
    pub base_url: String,

    #[serde(default = "default_true")]
    pub wait_on_rate_limit: bool,

    #[serde(default = "default_rate_limit_max_wait")]
    pub rate_limit_max_wait_secs: u64,
}

// Default value functions
fn default_bind() -> String {
    "127.0.0.1:4000".to_string()
}

fn default_news_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

fn default_news_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    200
}

fn default_llm_timeout() -> u64 {
    45
}

fn default_x_base_url() -> String {
    "https://api.twitter.com".to_string()
}

fn default_rate_limit_max_wait() -> u64 {
    900
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_base_url(),
            timeout_secs: default_news_timeout(),
            verify_key_on_startup: default_true(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl Default for XConfig {
    fn default() -> Self {
        Self {
            base_url: default_x_base_url(),
            wait_on_rate_limit: default_true(),
            rate_limit_max_wait_secs: default_rate_limit_max_wait(),
        }
    }
}

impl LlmConfig {
    /// Settings handed to the summarizer adapter
    pub fn adapter_config(&self) -> AdapterLlmConfig {
        AdapterLlmConfig {
            model: self.model.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            timeout_secs: self.timeout_secs,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("NEWS_RELAY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# news-relay configuration
#
# Secrets are read from the environment (or a .env file), never from here:
#   OPENAI_API_KEY, NEWS_API_KEY,
#   TWITTER_API_KEY, TWITTER_API_SECRET,
#   TWITTER_ACCESS_TOKEN, TWITTER_ACCESS_TOKEN_SECRET,
#   TWITTER_BEARER_TOKEN (optional)
#
# Any value below can be overridden with NEWS_RELAY__SECTION__KEY,
# e.g. NEWS_RELAY__LLM__MODEL=gpt-4o-mini

[server]
bind = "127.0.0.1:4000"

[news]
base_url = "https://newsapi.org/v2"
timeout_secs = 30
verify_key_on_startup = true

[llm]
base_url = "https://api.openai.com/v1"
model = "gpt-3.5-turbo"
temperature = 0.7
max_output_tokens = 200
timeout_secs = 45

[x]
base_url = "https://api.twitter.com"
wait_on_rate_limit = true
rate_limit_max_wait_secs = 900
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_toml_matches_defaults() {
        let parsed: AppConfig = toml::from_str(&AppConfig::example_toml()).unwrap();
        let defaults = AppConfig::default();

        assert_eq!(parsed.server.bind, defaults.server.bind);
        assert_eq!(parsed.news.base_url, defaults.news.base_url);
        assert_eq!(parsed.llm.model, defaults.llm.model);
        assert_eq!(parsed.llm.max_output_tokens, defaults.llm.max_output_tokens);
        assert_eq!(parsed.x.rate_limit_max_wait_secs, defaults.x.rate_limit_max_wait_secs);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let parsed: AppConfig = toml::from_str("[llm]\nmodel = \"gpt-4o-mini\"\n").unwrap();

        assert_eq!(parsed.llm.model, "gpt-4o-mini");
        assert_eq!(parsed.llm.temperature, 0.7);
        assert!(parsed.news.verify_key_on_startup);
        assert!(parsed.x.wait_on_rate_limit);
    }

    #[test]
    fn test_load_rejects_missing_explicit_path() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/news-relay.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_adapter_config() {
        let config = LlmConfig::default().adapter_config();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_output_tokens, 200);
    }
}
