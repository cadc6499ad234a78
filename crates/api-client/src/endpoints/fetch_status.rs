//! `fetchStatus`

use crate::client::{ApiRequest, CwsClient};
use crate::error::ApiResult;
use crate::types::{ItemName, ItemStatus, Projection};
use reqwest::Method;
use std::time::Duration;

/// Call builder for fetching the status of an item
#[derive(Debug)]
#[must_use = "call builders do nothing until `send` is awaited"]
pub struct FetchStatusCall {
    client: CwsClient,
    name: ItemName,
    projection: Option<Projection>,
    timeout: Option<Duration>,
}

impl FetchStatusCall {
    pub(crate) fn new(client: CwsClient, name: ItemName) -> Self {
        Self {
            client,
            name,
            projection: None,
            timeout: None,
        }
    }

    /// Report on the draft or the published revision
    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Deadline for this request, overriding the client timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Execute the request
    pub async fn send(self) -> ApiResult<ItemStatus> {
        let url = self.client.method_url(&self.name, "fetchStatus");
        let mut request = ApiRequest::new(Method::GET, url).timeout(self.timeout);

        if let Some(projection) = self.projection {
            request = request.query("projection", projection.as_str());
        }

        self.client.execute(request).await
    }
}
