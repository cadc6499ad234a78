//! Error types for the API client

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Malformed item resource name
    #[error("Invalid item name: {0}")]
    InvalidItemName(String),

    /// A call parameter is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Upload was sent without a media body
    #[error("media is required for upload")]
    MissingMedia,

    /// Token endpoint rejected the credentials
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// API returned a non-2xx response
    #[error("{0}")]
    Http(HttpError),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// The HTTP error details, if the API answered with an error status
    #[must_use]
    pub fn http(&self) -> Option<&HttpError> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status code of an API error response
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.http().map(|e| e.status)
    }

    /// Check if this is a 404 response
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.http().is_some_and(HttpError::is_not_found)
    }

    /// Check if this is a 401 response
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.http().is_some_and(HttpError::is_unauthorized)
    }

    /// Check if this is a 403 response
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.http().is_some_and(HttpError::is_forbidden)
    }

    /// Check if this is a 429 response
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.http().is_some_and(HttpError::is_rate_limited)
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(s) if (400..500).contains(&s))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.http().is_some_and(HttpError::is_server_error)
    }
}

/// Error response returned by the Chrome Web Store API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status
    pub status_text: String,
    /// Raw response body
    pub body: String,
    /// Message from the Google error envelope, when present
    pub message: Option<String>,
}

/// `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND"}}`
#[derive(Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorDetail,
}

#[derive(Deserialize)]
struct GoogleErrorDetail {
    #[serde(default)]
    message: String,
}

impl HttpError {
    /// Build from a status code and the raw response body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = serde_json::from_str::<GoogleErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error.message)
            .filter(|m| !m.is_empty());
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();

        Self {
            status,
            status_text,
            body,
            message,
        }
    }

    /// Build from a response status and body
    pub fn from_response(status: reqwest::StatusCode, body: String) -> Self {
        Self::new(status.as_u16(), body)
    }

    /// 404 Not Found
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// 401 Unauthorized
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// 403 Forbidden
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// 429 Too Many Requests
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// 5xx
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message {
            Some(ref message) => write!(f, "{message} (HTTP {})", self.status),
            None => write!(f, "HTTP {}: {}", self.status, self.status_text),
        }
    }
}

impl std::error::Error for HttpError {}
