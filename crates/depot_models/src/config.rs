//! Connection settings for an OpenAI-compatible endpoint.

use std::time::Duration;

/// Connection settings for an OpenAI-compatible endpoint.
///
/// # Examples
///
/// ```
/// use depot_models::OpenAiConfig;
/// use std::time::Duration;
///
/// let config = OpenAiConfig::new("http://localhost:8080/v1", "local-model")
///     .with_api_key("sk-test")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.model, "local-model");
/// assert!(config.api_key.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenAiConfig {
    /// Base URL, up to and including the version segment
    pub base_url: String,
    /// Model used when a request does not name one
    pub model: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// Ceiling for non-streaming calls
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Create a configuration without credentials.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Chat-completions endpoint URL.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
