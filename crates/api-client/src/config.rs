//! Configuration for the Chrome Web Store API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default base URL for API requests
pub const DEFAULT_BASE_URL: &str = "https://chromewebstore.googleapis.com";

/// Default base URL for media upload requests
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://chromewebstore.googleapis.com/upload";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for API requests
    pub base_url: String,
    /// Base URL for upload requests
    pub upload_base_url: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("cws-api-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `CWS_API_URL`: Base URL for API requests
    /// - `CWS_UPLOAD_URL`: Base URL for uploads
    /// - `CWS_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("CWS_API_URL") {
            config.base_url = url;
        }
        if let Ok(url) = env::var("CWS_UPLOAD_URL") {
            config.upload_base_url = url;
        }
        if let Ok(secs) = env::var("CWS_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| ApiError::config(format!("CWS_TIMEOUT_SECS is not a number: {secs}")))?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set upload base URL
    #[must_use]
    pub fn with_upload_base_url(mut self, url: impl Into<String>) -> Self {
        self.upload_base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        validate_url("base_url", &self.base_url)?;
        validate_url("upload_base_url", &self.upload_base_url)?;

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

fn validate_url(field: &str, url: &str) -> ApiResult<()> {
    if url.is_empty() {
        return Err(ApiError::config(format!("{field} cannot be empty")));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApiError::InvalidUrl(format!(
            "{field} must start with http:// or https://, got {url}"
        )));
    }

    Ok(())
}
