//! Main API client implementation

use crate::auth::{AuthConfig, RefreshTokenSource, StaticTokenSource, TokenSource};
use crate::config::ClientConfig;
use crate::endpoints::{MediaApi, PublishersApi};
use crate::error::{ApiError, ApiResult, HttpError};
use crate::types::ItemName;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Chrome Web Store API client
///
/// Cheap to clone: the HTTP connection pool, configuration and token source
/// are shared between clones. Resources are reached through
/// [`publishers`](Self::publishers) and [`media`](Self::media), each method
/// returning a call builder that is finished with `send().await`.
#[derive(Clone)]
pub struct CwsClient {
    inner: Client,
    config: Arc<ClientConfig>,
    token_source: Option<Arc<dyn TokenSource>>,
}

impl CwsClient {
    /// Create an unauthenticated client with specific configuration
    ///
    /// Attach credentials with [`with_token_source`](Self::with_token_source)
    /// or [`with_credentials`](Self::with_credentials).
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::config("user_agent contains invalid header characters"))?;
        default_headers.insert(USER_AGENT, user_agent);

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            token_source: None,
        })
    }

    /// Create a client from environment variables
    ///
    /// Uses `CHROME_WEBSTORE_ACCESS_TOKEN` when set, otherwise the refresh
    /// token credentials read by [`AuthConfig::from_env`].
    pub fn from_env() -> ApiResult<Self> {
        let client = Self::new(ClientConfig::from_env()?)?;

        match env::var("CHROME_WEBSTORE_ACCESS_TOKEN") {
            Ok(token) if !token.is_empty() => Ok(client.with_access_token(token)),
            _ => client.with_credentials(AuthConfig::from_env()?),
        }
    }

    /// Default configuration with the refresh token flow
    pub fn from_credentials(auth: AuthConfig) -> ApiResult<Self> {
        Self::new(ClientConfig::default())?.with_credentials(auth)
    }

    /// Default configuration with a static access token
    ///
    /// Access tokens expire after an hour and are not refreshed.
    pub fn from_access_token(token: impl Into<String>) -> ApiResult<Self> {
        Ok(Self::new(ClientConfig::default())?.with_access_token(token))
    }

    /// Attach a token source used for every request
    #[must_use]
    pub fn with_token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Authenticate with the refresh token flow
    pub fn with_credentials(self, auth: AuthConfig) -> ApiResult<Self> {
        let source = RefreshTokenSource::new(auth)?;
        Ok(self.with_token_source(Arc::new(source)))
    }

    /// Authenticate with a fixed access token
    #[must_use]
    pub fn with_access_token(self, token: impl Into<String>) -> Self {
        self.with_token_source(Arc::new(StaticTokenSource::new(token)))
    }

    /// Whether requests carry an `Authorization` header
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token_source.is_some()
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the upload base URL
    #[must_use]
    pub fn upload_base_url(&self) -> &str {
        &self.config.upload_base_url
    }

    /// Point API requests at another host, e.g. a mock server
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        Arc::make_mut(&mut self.config).base_url = url.into();
    }

    /// Point upload requests at another host
    pub fn set_upload_base_url(&mut self, url: impl Into<String>) {
        Arc::make_mut(&mut self.config).upload_base_url = url.into();
    }

    // -------------------------------------------------------------------------
    // Resource accessors
    // -------------------------------------------------------------------------

    /// Access publisher-scoped resources
    #[must_use]
    pub fn publishers(&self) -> PublishersApi {
        PublishersApi::new(self.clone())
    }

    /// Access media upload operations
    #[must_use]
    pub fn media(&self) -> MediaApi {
        MediaApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Request plumbing
    // -------------------------------------------------------------------------

    /// `{base}/v2/{name}:{verb}` on the API host
    pub(crate) fn method_url(&self, name: &ItemName, verb: &str) -> String {
        build_url(&self.config.base_url, &format!("/v2/{name}:{verb}"))
    }

    /// `{upload_base}/v2/{name}:{verb}` on the upload host
    pub(crate) fn upload_url(&self, name: &ItemName, verb: &str) -> String {
        build_url(&self.config.upload_base_url, &format!("/v2/{name}:{verb}"))
    }

    /// Send a request and decode the JSON response
    #[instrument(
        skip(self, request),
        fields(method = %request.method, url = %request.url, request_id = tracing::field::Empty)
    )]
    pub(crate) async fn execute<T>(&self, request: ApiRequest) -> ApiResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let mut builder = self
            .inner
            .request(request.method.clone(), &request.url)
            .header(X_REQUEST_ID, &request_id);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(ref source) = self.token_source {
            let token = source.token().await?;
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.token));
        }

        builder = match request.body {
            // Google front ends reject body-less POSTs without a Content-Length
            RequestBody::Empty if request.method == Method::POST => builder.body(Vec::<u8>::new()),
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Media { data, media_type } => {
                debug!(bytes = data.len(), media_type = %media_type, "Attaching media");
                builder.header(CONTENT_TYPE, media_type).body(data)
            }
        };

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let start = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            bytes = body.len(),
            "Response received"
        );

        if !status.is_success() {
            let error = HttpError::from_response(status, String::from_utf8_lossy(&body).into_owned());
            warn!(status = error.status, error = %error, "API returned an error");
            return Err(ApiError::Http(error));
        }

        decode_body(&body)
    }
}

impl fmt::Debug for CwsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CwsClient")
            .field("config", &self.config)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// A fully described outbound request, produced by the call builders
#[derive(Debug)]
pub(crate) struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: Method, url: String) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
        }
    }

    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug)]
pub(crate) enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Media { data: Vec<u8>, media_type: String },
}

/// Join a base URL and an absolute path
fn build_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Decode a 2xx body; an empty body yields the default value
fn decode_body<T: DeserializeOwned + Default>(body: &[u8]) -> ApiResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemStatus;

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_url("https://example.com/", "/v2/x:fetchStatus"),
            "https://example.com/v2/x:fetchStatus"
        );
        assert_eq!(build_url("http://127.0.0.1:9", "/a"), "http://127.0.0.1:9/a");
    }

    #[test]
    fn test_method_urls() {
        let client = CwsClient::new(ClientConfig::default()).unwrap();
        let name = ItemName::new("pub", "item");

        assert_eq!(
            client.method_url(&name, "publish"),
            "https://chromewebstore.googleapis.com/v2/publishers/pub/items/item:publish"
        );
        assert_eq!(
            client.upload_url(&name, "upload"),
            "https://chromewebstore.googleapis.com/upload/v2/publishers/pub/items/item:upload"
        );
    }

    #[test]
    fn test_client_creation() {
        let client = CwsClient::new(ClientConfig::default()).unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.base_url(), crate::config::DEFAULT_BASE_URL);
        assert_eq!(client.upload_base_url(), crate::config::DEFAULT_UPLOAD_BASE_URL);

        let client = client.with_access_token("token");
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_from_credentials() {
        let client = CwsClient::from_credentials(AuthConfig::new("id", "secret", "refresh"));
        assert!(client.unwrap().is_authenticated());

        let client = CwsClient::from_credentials(AuthConfig::new("id", "", "refresh"));
        assert!(client.is_err());
    }

    #[test]
    fn test_set_base_urls_does_not_affect_clones() {
        let original = CwsClient::new(ClientConfig::default()).unwrap();
        let mut changed = original.clone();
        changed.set_base_url("http://localhost:1234");
        changed.set_upload_base_url("http://localhost:1234/upload");

        assert_eq!(changed.base_url(), "http://localhost:1234");
        assert_eq!(changed.upload_base_url(), "http://localhost:1234/upload");
        assert_eq!(original.base_url(), crate::config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClientConfig::default().with_base_url("not-a-url");
        assert!(CwsClient::new(config).is_err());
    }

    #[test]
    fn test_decode_empty_body_yields_default() {
        let status: ItemStatus = decode_body(b"").unwrap();
        assert_eq!(status, ItemStatus::default());

        let status: ItemStatus = decode_body(b"  \n").unwrap();
        assert!(status.name.is_empty());

        assert!(decode_body::<ItemStatus>(b"{not json").is_err());
    }
}
