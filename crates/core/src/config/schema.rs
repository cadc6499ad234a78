//! Configuration schema definitions
//!
//! Every key is optional; command-line flags and environment variables take
//! precedence over values read from the file.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigSchema {
    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub item: ItemConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

/// OAuth credentials
#[derive(Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    /// OAuth 2.0 client ID
    pub client_id: Option<String>,

    /// OAuth 2.0 client secret
    pub client_secret: Option<String>,

    /// Long-lived refresh token
    pub refresh_token: Option<String>,

    /// Short-lived access token, used instead of the refresh flow when set
    pub access_token: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("CredentialsConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("access_token", &redact(&self.access_token))
            .finish()
    }
}

/// The store item commands operate on
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ItemConfig {
    /// Publisher ID
    pub publisher_id: Option<String>,

    /// Item (extension) ID
    pub item_id: Option<String>,
}

/// API endpoint overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL for API requests
    pub base_url: Option<String>,

    /// Base URL for uploads
    pub upload_base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}
