//! Provider configuration from TOML (`[provider]` section)
//!
//! Any endpoint speaking the OpenAI chat completions protocol works.

use serde::{Deserialize, Serialize};

/// OpenAI-compatible provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL; `/v1/chat/completions` is appended.
    pub base_url: String,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended — use env var instead).
    pub api_key: Option<String>,
    /// Default model for every participant.
    pub model: String,
    /// Max tokens per reply.
    pub max_tokens: u32,
    /// Sampling temperature; omitted from requests when unset.
    pub temperature: Option<f32>,
    /// HTTP request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
            temperature: Some(0.7),
            request_timeout_seconds: 180,
        }
    }
}

impl FileProviderConfig {
    /// Direct key first, then the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_key_wins() {
        let config = FileProviderConfig {
            api_key: Some("sk-direct".to_string()),
            api_key_env: "ROUNDTABLE_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-direct"));
    }

    #[test]
    fn test_missing_key() {
        let config = FileProviderConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "ROUNDTABLE_TEST_DEFINITELY_UNSET".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }
}
