//! CLI command implementations

pub mod cancel_submission;
pub mod deploy_percentage;
pub mod fetch_status;
pub mod publish;
pub mod upload;

use clap::ValueEnum;
use cws_api_client::{ApiError, Projection, PublishType};
use cws_core::{Error, ErrorCode};

/// `--log-format` values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// `--type` values of `publish`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PublishTypeArg {
    /// Publish as soon as the review passes
    Immediate,
    /// Keep the approved revision staged until published manually
    Staged,
}

impl From<PublishTypeArg> for PublishType {
    fn from(arg: PublishTypeArg) -> Self {
        match arg {
            PublishTypeArg::Immediate => PublishType::Immediate,
            PublishTypeArg::Staged => PublishType::Staged,
        }
    }
}

/// `--projection` values of `fetch-status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectionArg {
    Draft,
    Published,
}

impl From<ProjectionArg> for Projection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Draft => Projection::Draft,
            ProjectionArg::Published => Projection::Published,
        }
    }
}

/// Translate a client error into a coded CLI error
pub fn api_error(err: ApiError) -> Error {
    let code = match &err {
        ApiError::Http(http) if http.is_unauthorized() => ErrorCode::InvalidCredentials,
        ApiError::Http(http) if http.is_forbidden() => ErrorCode::PermissionDeniedByApi,
        ApiError::Http(http) if http.is_not_found() => ErrorCode::ItemNotFound,
        ApiError::Http(http) if http.is_rate_limited() => ErrorCode::RateLimited,
        ApiError::Http(http) if http.is_server_error() => ErrorCode::ServerError,
        ApiError::Http(_) => ErrorCode::ApiError,
        ApiError::Request(e) if e.is_timeout() => ErrorCode::Timeout,
        ApiError::Request(_) => ErrorCode::RequestFailed,
        ApiError::Json(_) => ErrorCode::InvalidResponse,
        ApiError::Auth(_) => ErrorCode::InvalidCredentials,
        ApiError::MissingEnvVar(_) => ErrorCode::MissingCredentials,
        ApiError::Config(_) | ApiError::InvalidUrl(_) => ErrorCode::InvalidConfigValue,
        ApiError::InvalidItemName(_) | ApiError::InvalidArgument(_) => ErrorCode::InvalidInput,
        ApiError::MissingMedia => ErrorCode::MissingArgument,
    };

    let suggestion = match code {
        ErrorCode::InvalidCredentials => {
            Some("Check the client ID, client secret and refresh token, or obtain a new token")
        }
        ErrorCode::PermissionDeniedByApi => {
            Some("Make sure the account owns the item and the token has the chromewebstore scope")
        }
        ErrorCode::ItemNotFound => Some("Check --publisher-id and --item-id"),
        ErrorCode::RateLimited => Some("Wait a moment before trying again"),
        ErrorCode::Timeout => Some("Raise the limit with --timeout"),
        _ => None,
    };

    let error = Error::new(code, err.to_string()).with_source(err);
    match suggestion {
        Some(s) => error.with_suggestion(s),
        None => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cws_api_client::HttpError;
    use cws_core::error::exit_codes;

    fn http(status: u16, body: &str) -> ApiError {
        ApiError::Http(HttpError::new(status, body))
    }

    #[test]
    fn test_http_errors_map_to_api_codes() {
        let err = api_error(http(
            404,
            r#"{"error": {"code": 404, "message": "Item not found"}}"#,
        ));
        assert_eq!(err.code, ErrorCode::ItemNotFound);
        assert_eq!(err.message, "Item not found (HTTP 404)");
        assert_eq!(err.exit_code(), exit_codes::API_ERROR);
        assert!(err.suggestion.is_some());

        assert_eq!(api_error(http(429, "")).code, ErrorCode::RateLimited);
        assert_eq!(api_error(http(502, "")).code, ErrorCode::ServerError);
        assert_eq!(api_error(http(409, "")).code, ErrorCode::ApiError);
    }

    #[test]
    fn test_auth_failures_exit_with_auth_status() {
        let err = api_error(http(401, ""));
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert_eq!(err.exit_code(), exit_codes::AUTH_ERROR);

        let err = api_error(ApiError::Auth("invalid_grant".into()));
        assert_eq!(err.exit_code(), exit_codes::AUTH_ERROR);
    }

    #[test]
    fn test_local_errors() {
        let err = api_error(ApiError::invalid_argument("deploy percentage"));
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_ERROR);

        let err = api_error(ApiError::MissingMedia);
        assert_eq!(err.message, "media is required for upload");
        assert!(err.source.is_some());
    }

    #[test]
    fn test_value_enums_convert() {
        assert_eq!(PublishType::from(PublishTypeArg::Staged), PublishType::Staged);
        assert_eq!(Projection::from(ProjectionArg::Draft), Projection::Draft);
    }
}
