//! # API Client Configuration
//!
//! Configuration for connecting to the storefront backend.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Explicit values passed to [`EcoApiConfig::new`]
//! 2. Environment variables (`ECOSTORE_*`)
//! 3. Defaults (local development backend)
//!
//! ## Environment Variables
//! - `ECOSTORE_API_URL` - backend base URL (default `http://localhost:8080`)
//! - `ECOSTORE_API_TIMEOUT_SECS` - per-request timeout (default 10)
//! - `ECOSTORE_API_RETRY_SECS` - max elapsed retry window for GETs
//!   (default 5; 0 disables retry)

use std::time::Duration;
use url::Url;

use crate::error::{ApiError, ApiResult};

/// Default backend for local development.
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Configuration for the REST client.
#[derive(Debug, Clone)]
pub struct EcoApiConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout. Timeouts surface as failures; there is no
    /// separate cancellation channel.
    pub timeout: Duration,

    /// Maximum elapsed time spent retrying an idempotent GET.
    /// Zero disables retry entirely.
    pub retry_max_elapsed: Duration,
}

impl EcoApiConfig {
    /// Creates a config for the given base URL with default timings.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        EcoApiConfig {
            base_url,
            ..EcoApiConfig::default()
        }
    }

    /// Builds configuration from environment variables and defaults.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ECOSTORE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let mut config = EcoApiConfig::new(base_url);

        if let Ok(secs) = std::env::var("ECOSTORE_API_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(secs) = std::env::var("ECOSTORE_API_RETRY_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.retry_max_elapsed = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Validates the configuration before the client is built.
    pub fn validate(&self) -> ApiResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("bad base URL: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::InvalidConfig(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::InvalidConfig("timeout must be non-zero".into()));
        }

        Ok(())
    }
}

impl Default for EcoApiConfig {
    fn default() -> Self {
        EcoApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            retry_max_elapsed: Duration::from_secs(5),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = EcoApiConfig::new("https://api.ecostore.example/");
        assert_eq!(config.base_url, "https://api.ecostore.example");
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(EcoApiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert!(EcoApiConfig::new("not a url").validate().is_err());
        assert!(EcoApiConfig::new("ftp://example.com").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = EcoApiConfig::default();
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
