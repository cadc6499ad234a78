//! `setPublishedDeployPercentage`

use crate::client::{ApiRequest, CwsClient};
use crate::error::{ApiError, ApiResult};
use crate::types::{ItemName, SetPublishedDeployPercentageResponse};
use reqwest::Method;
use std::time::Duration;

/// Call builder for changing the rollout percentage of a published item
///
/// Defaults to a full (100%) rollout when no percentage is set.
#[derive(Debug)]
#[must_use = "call builders do nothing until `send` is awaited"]
pub struct SetPublishedDeployPercentageCall {
    client: CwsClient,
    name: ItemName,
    deploy_percentage: u8,
    timeout: Option<Duration>,
}

impl SetPublishedDeployPercentageCall {
    pub(crate) fn new(client: CwsClient, name: ItemName) -> Self {
        Self {
            client,
            name,
            deploy_percentage: 100,
            timeout: None,
        }
    }

    /// Share of users that should receive the published version (0-100)
    pub fn deploy_percentage(mut self, percentage: u8) -> Self {
        self.deploy_percentage = percentage;
        self
    }

    /// Deadline for this request, overriding the client timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Execute the request
    pub async fn send(self) -> ApiResult<SetPublishedDeployPercentageResponse> {
        if self.deploy_percentage > 100 {
            return Err(ApiError::invalid_argument(format!(
                "deploy percentage must be between 0 and 100, got {}",
                self.deploy_percentage
            )));
        }

        let url = self
            .client
            .method_url(&self.name, "setPublishedDeployPercentage");
        let request = ApiRequest::new(Method::POST, url)
            .query("deployPercentage", self.deploy_percentage.to_string())
            .timeout(self.timeout);

        self.client.execute(request).await
    }
}
