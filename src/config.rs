//! Engine configuration from environment variables

use std::env;

/// Runtime configuration for the retrieval engine.
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the social-graph API
    pub api_base: String,

    /// Timeline page size cap (the API maximum per request)
    pub page_size: u32,

    /// Per-request HTTP timeout in seconds
    pub http_timeout_secs: u64,

    /// Rate-limit poll cadence in milliseconds
    pub quota_poll_interval_ms: u64,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `TWEETPULSE_API_BASE` (default: https://twitter.com)
    /// - `TWEETPULSE_PAGE_SIZE` (default: 200)
    /// - `TWEETPULSE_HTTP_TIMEOUT_SECS` (default: 10)
    /// - `TWEETPULSE_QUOTA_POLL_INTERVAL_MS` (default: 4000)
    pub fn from_env() -> Self {
        Self {
            api_base: env::var("TWEETPULSE_API_BASE")
                .unwrap_or_else(|_| "https://twitter.com".to_string()),

            page_size: env::var("TWEETPULSE_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(200),

            http_timeout_secs: env::var("TWEETPULSE_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),

            quota_poll_interval_ms: env::var("TWEETPULSE_QUOTA_POLL_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4_000),
        }
    }
}
