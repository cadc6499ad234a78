//! Typed client for the Chrome Web Store API v2
//!
//! This crate wraps the publish lifecycle of a Chrome Web Store item:
//! uploading a package, submitting it for review, checking its status,
//! cancelling a submission and adjusting the rollout of a published version.
//!
//! # Features
//!
//! - **Fluent call builders**: every API method returns a call object that
//!   collects optional parameters and issues one request on `send().await`
//! - **OAuth 2.0**: refresh token flow or a static access token
//! - **Typed errors**: API failures carry the HTTP status and the message
//!   from Google's error envelope
//! - **Request correlation**: every request carries an `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use cws_api_client::{AuthConfig, CwsClient, ItemName, PublishType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CwsClient::from_credentials(AuthConfig::from_env()?)?;
//!     let item = ItemName::new("my-publisher", "my-item");
//!
//!     let upload = client
//!         .media()
//!         .upload(&item)
//!         .media(std::fs::read("extension.zip")?, "application/zip")
//!         .send()
//!         .await?;
//!     println!("Uploaded version {:?}", upload.crx_version);
//!
//!     let publish = client
//!         .publishers()
//!         .items()
//!         .publish(&item)
//!         .publish_type(PublishType::Staged)
//!         .send()
//!         .await?;
//!     println!("Item is now {}", publish.state);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod types;

pub use auth::{AccessToken, AuthConfig, RefreshTokenSource, StaticTokenSource, TokenSource};
pub use client::CwsClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, HttpError};
pub use types::{
    CancelSubmissionResponse, ItemName, ItemState, ItemStatus, Projection, PublishResponse,
    PublishType, SetPublishedDeployPercentageResponse, UploadResponse, UploadState,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::auth::{AuthConfig, TokenSource};
    pub use crate::client::CwsClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{ItemsApi, MediaApi, PublishersApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::types::{ItemName, ItemState, Projection, PublishType, UploadState};
}
