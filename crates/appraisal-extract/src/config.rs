//! Configuration for the extraction client

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for AI document extraction
///
/// The API key is deliberately not part of this struct; the client
/// reads `GEMINI_API_KEY` itself so configs stay serializable without
/// carrying secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Generative-AI model used for extraction
    pub model: String,

    /// Base URL of the file and generation APIs
    pub api_base_url: String,

    /// Seconds between polls while an uploaded file is preprocessing
    pub poll_interval_secs: u64,

    /// Seconds between polls during the short state-lookup phase
    pub state_poll_interval_secs: u64,

    /// Polls per file before giving up on preprocessing
    pub max_poll_attempts: u32,

    /// Timeout for individual HTTP requests
    pub request_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `APPRAISAL_MODEL`: Model name (default: "gemini-2.5-flash")
    /// - `APPRAISAL_API_BASE`: API base URL (default: Google Generative Language API)
    /// - `APPRAISAL_POLL_INTERVAL`: Seconds between processing polls (default: 10)
    /// - `APPRAISAL_STATE_POLL_INTERVAL`: Seconds between state-lookup polls (default: 5)
    /// - `APPRAISAL_MAX_POLLS`: Polls per file before timing out (default: 60)
    /// - `APPRAISAL_REQUEST_TIMEOUT`: HTTP request timeout in seconds (default: 300)
    #[must_use = "creates config from environment variables"]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let model = env::var("APPRAISAL_MODEL").unwrap_or(defaults.model);
        let api_base_url = env::var("APPRAISAL_API_BASE").unwrap_or(defaults.api_base_url);

        let poll_interval_secs = env::var("APPRAISAL_POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.poll_interval_secs);

        let state_poll_interval_secs = env::var("APPRAISAL_STATE_POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.state_poll_interval_secs);

        let max_poll_attempts = env::var("APPRAISAL_MAX_POLLS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_poll_attempts);

        let request_timeout_secs = env::var("APPRAISAL_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        Self {
            model,
            api_base_url,
            poll_interval_secs,
            state_poll_interval_secs,
            max_poll_attempts,
            request_timeout_secs,
        }
    }
}

impl Default for ExtractorConfig {
    #[inline]
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_base_url: "https://generativelanguage.googleapis.com".to_string(),
            poll_interval_secs: 10,
            state_poll_interval_secs: 5,
            max_poll_attempts: 60,
            request_timeout_secs: 300,
        }
    }
}
