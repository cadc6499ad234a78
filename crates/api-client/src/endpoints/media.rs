//! Media uploads

use crate::client::{ApiRequest, CwsClient, RequestBody};
use crate::error::{ApiError, ApiResult};
use crate::types::{ItemName, UploadResponse};
use reqwest::Method;
use std::time::Duration;

/// Content type used when the caller does not name one
pub const DEFAULT_MEDIA_TYPE: &str = "application/zip";

/// Media API interface
#[derive(Clone, Debug)]
pub struct MediaApi {
    client: CwsClient,
}

impl MediaApi {
    pub(crate) fn new(client: CwsClient) -> Self {
        Self { client }
    }

    /// Upload a new package for an item
    ///
    /// POST /upload/v2/{name}:upload
    #[must_use]
    pub fn upload(&self, name: &ItemName) -> UploadCall {
        UploadCall::new(self.client.clone(), name.clone())
    }
}

/// Call builder for uploading an extension package
#[derive(Debug)]
#[must_use = "call builders do nothing until `send` is awaited"]
pub struct UploadCall {
    client: CwsClient,
    name: ItemName,
    media: Option<Vec<u8>>,
    media_type: String,
    timeout: Option<Duration>,
}

impl UploadCall {
    pub(crate) fn new(client: CwsClient, name: ItemName) -> Self {
        Self {
            client,
            name,
            media: None,
            media_type: DEFAULT_MEDIA_TYPE.to_string(),
            timeout: None,
        }
    }

    /// Package bytes and their content type
    ///
    /// An empty `media_type` keeps the current one (`application/zip` by default).
    pub fn media(mut self, data: impl Into<Vec<u8>>, media_type: &str) -> Self {
        self.media = Some(data.into());
        if !media_type.is_empty() {
            self.media_type = media_type.to_string();
        }
        self
    }

    /// Deadline for this request, overriding the client timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Execute the upload
    pub async fn send(self) -> ApiResult<UploadResponse> {
        let data = self.media.ok_or(ApiError::MissingMedia)?;

        let url = self.client.upload_url(&self.name, "upload");
        let request = ApiRequest::new(Method::POST, url)
            .body(RequestBody::Media {
                data,
                media_type: self.media_type,
            })
            .timeout(self.timeout);

        self.client.execute(request).await
    }
}
