//! OAuth 2.0 token sources
//!
//! The client asks a [`TokenSource`] for a bearer token before every request.
//! Two sources ship with the crate:
//!
//! - [`StaticTokenSource`]: a fixed access token (expires after an hour and is
//!   never refreshed)
//! - [`RefreshTokenSource`]: the installed-app refresh token flow against
//!   Google's token endpoint, reusing the access token until it expires

use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use oauth2::basic::{BasicClient, BasicErrorResponse};
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthType, AuthUrl, ClientId, ClientSecret, RefreshToken, RequestTokenError, TokenResponse,
    TokenUrl,
};
use std::env;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// OAuth 2.0 scope for the Chrome Web Store API
pub const SCOPE_CHROMEWEBSTORE: &str = "https://www.googleapis.com/auth/chromewebstore";

/// Read-only OAuth 2.0 scope
pub const SCOPE_CHROMEWEBSTORE_READONLY: &str =
    "https://www.googleapis.com/auth/chromewebstore.readonly";

/// Google's OAuth 2.0 authorization endpoint
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";

/// Google's OAuth 2.0 token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Upper bound for one token exchange
const REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

type TokenError = RequestTokenError<oauth2::reqwest::Error<reqwest::Error>, BasicErrorResponse>;

/// Tokens are treated as expired this long before their real expiry
const EXPIRY_SKEW: Duration = Duration::from_secs(10);

/// A bearer token and its expiry
#[derive(Clone)]
pub struct AccessToken {
    /// Raw token value
    pub token: String,
    /// When the token stops being valid; `None` means unknown
    pub expires_at: Option<Instant>,
}

impl AccessToken {
    /// A token without known expiry
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    /// A token valid for `ttl` from now
    ///
    /// A lifetime too large to represent is treated as unknown expiry.
    pub fn expiring_in(token: impl Into<String>, ttl: Duration) -> Self {
        Self {
            token: token.into(),
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    /// Whether the token is expired or about to expire
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|at| Instant::now() + EXPIRY_SKEW >= at)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Supplies bearer tokens for outgoing requests
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return a currently valid access token
    async fn token(&self) -> ApiResult<AccessToken>;
}

/// Always hands out the same token
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: AccessToken,
}

impl StaticTokenSource {
    /// Wrap a raw access token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> ApiResult<AccessToken> {
        Ok(self.token.clone())
    }
}

/// Credentials for the refresh token flow
#[derive(Clone)]
pub struct AuthConfig {
    /// OAuth 2.0 client ID
    pub client_id: String,
    /// OAuth 2.0 client secret
    pub client_secret: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Token endpoint
    pub token_url: String,
}

impl AuthConfig {
    /// Credentials against Google's token endpoint
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
        }
    }

    /// Read credentials from the environment
    ///
    /// - `CHROME_WEBSTORE_CLIENT_ID`
    /// - `CHROME_WEBSTORE_CLIENT_SECRET`
    /// - `CHROME_WEBSTORE_REFRESH_TOKEN`
    pub fn from_env() -> ApiResult<Self> {
        let var = |name: &str| {
            env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ApiError::missing_env(name))
        };

        Ok(Self::new(
            var("CHROME_WEBSTORE_CLIENT_ID")?,
            var("CHROME_WEBSTORE_CLIENT_SECRET")?,
            var("CHROME_WEBSTORE_REFRESH_TOKEN")?,
        ))
    }

    /// Builder-style method to override the token endpoint
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Validate that every credential is present
    pub fn validate(&self) -> ApiResult<()> {
        for (field, value) in [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", &self.refresh_token),
            ("token_url", &self.token_url),
        ] {
            if value.is_empty() {
                return Err(ApiError::config(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("token_url", &self.token_url)
            .finish()
    }
}

/// Exchanges a refresh token for access tokens on demand
pub struct RefreshTokenSource {
    oauth: BasicClient,
    config: AuthConfig,
    current: Mutex<Option<AccessToken>>,
}

impl RefreshTokenSource {
    /// Create a token source for the given credentials
    pub fn new(config: AuthConfig) -> ApiResult<Self> {
        config.validate()?;

        let token_url = TokenUrl::new(config.token_url.clone())
            .map_err(|e| ApiError::InvalidUrl(format!("token_url {:?}: {e}", config.token_url)))?;
        let auth_url = AuthUrl::new(GOOGLE_AUTH_URL.to_string())
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let oauth = BasicClient::new(
            ClientId::new(config.client_id.clone()),
            Some(ClientSecret::new(config.client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::RequestBody);

        Ok(Self {
            oauth,
            config,
            current: Mutex::new(None),
        })
    }

    async fn refresh(&self) -> ApiResult<AccessToken> {
        debug!(token_url = %self.config.token_url, "Refreshing access token");

        let refresh_token = RefreshToken::new(self.config.refresh_token.clone());
        let exchange = self
            .oauth
            .exchange_refresh_token(&refresh_token)
            .request_async(async_http_client);

        let response = tokio::time::timeout(REFRESH_TIMEOUT, exchange)
            .await
            .map_err(|_| ApiError::Auth("token endpoint did not answer in time".to_string()))?
            .map_err(token_error)?;

        let secret = response.access_token().secret().clone();
        let expires_in = response.expires_in();
        let token = match expires_in {
            Some(ttl) => AccessToken::expiring_in(secret, ttl),
            None => AccessToken::new(secret),
        };

        debug!(?expires_in, "Access token refreshed");
        Ok(token)
    }
}

fn token_error(err: TokenError) -> ApiError {
    match err {
        RequestTokenError::ServerResponse(response) => ApiError::Auth(
            response
                .error_description()
                .cloned()
                .unwrap_or_else(|| response.error().to_string()),
        ),
        RequestTokenError::Request(oauth2::reqwest::Error::Reqwest(e)) => ApiError::Request(e),
        other => ApiError::Auth(other.to_string()),
    }
}

#[async_trait]
impl TokenSource for RefreshTokenSource {
    async fn token(&self) -> ApiResult<AccessToken> {
        let mut current = self.current.lock().await;

        if let Some(ref token) = *current {
            if !token.is_expired() {
                return Ok(token.clone());
            }
        }

        let token = self.refresh().await?;
        *current = Some(token.clone());
        Ok(token)
    }
}

impl fmt::Debug for RefreshTokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshTokenSource")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
