//! `publish`

use crate::client::{ApiRequest, CwsClient, RequestBody};
use crate::error::{ApiError, ApiResult};
use crate::types::{DeployInfo, ItemName, PublishRequest, PublishResponse, PublishType};
use reqwest::Method;
use std::time::Duration;

/// Call builder for publishing an item
///
/// The accumulated options are sent as a [`PublishRequest`] JSON body; unset
/// options are left out so the store applies its defaults.
#[derive(Debug)]
#[must_use = "call builders do nothing until `send` is awaited"]
pub struct PublishCall {
    client: CwsClient,
    name: ItemName,
    request: PublishRequest,
    timeout: Option<Duration>,
}

impl PublishCall {
    pub(crate) fn new(client: CwsClient, name: ItemName) -> Self {
        Self {
            client,
            name,
            request: PublishRequest::default(),
            timeout: None,
        }
    }

    /// Publish immediately after review, or stage the revision
    pub fn publish_type(mut self, publish_type: PublishType) -> Self {
        self.request.publish_type = Some(publish_type);
        self
    }

    /// Initial rollout percentage of the new revision (0-100)
    pub fn deploy_percentage(mut self, percentage: u8) -> Self {
        self.request.deploy_infos = vec![DeployInfo {
            deploy_percentage: percentage,
        }];
        self
    }

    /// Ask the store to skip review when the item qualifies
    pub fn skip_review(mut self, skip: bool) -> Self {
        self.request.skip_review = Some(skip);
        self
    }

    /// Deadline for this request, overriding the client timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Execute the request
    pub async fn send(self) -> ApiResult<PublishResponse> {
        if let Some(info) = self.request.deploy_infos.iter().find(|i| i.deploy_percentage > 100) {
            return Err(ApiError::invalid_argument(format!(
                "deploy percentage must be between 0 and 100, got {}",
                info.deploy_percentage
            )));
        }

        let url = self.client.method_url(&self.name, "publish");
        let body = serde_json::to_value(&self.request)?;
        let request = ApiRequest::new(Method::POST, url)
            .body(RequestBody::Json(body))
            .timeout(self.timeout);

        self.client.execute(request).await
    }
}
