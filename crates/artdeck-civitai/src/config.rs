//! Client configuration.

use std::time::Duration;

use url::Url;

/// Configuration for the CivitAI client.
#[derive(Debug, Clone)]
pub struct CivitaiConfig {
    /// Base URL for the CivitAI API (default: <https://civitai.com/api/v1>)
    pub base_url: Url,
    /// Optional API key sent as a bearer token.
    pub api_key: Option<String>,
    /// Additional retry attempts after the first failure (default: 2).
    pub max_retries: u8,
    /// Base delay for exponential backoff (default: 1000 ms).
    pub retry_base_delay_ms: u64,
    /// TCP connect timeout (default: 15 s).
    pub connect_timeout: Duration,
    /// Overall per-request timeout (default: 30 s).
    pub request_timeout: Duration,
}

impl Default for CivitaiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://civitai.com/api/v1")
                .expect("default CivitAI API URL is valid"),
            api_key: None,
            max_retries: 2,
            retry_base_delay_ms: 1000,
            connect_timeout: Duration::from_secs(15),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl CivitaiConfig {
    /// Configuration with an API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}
