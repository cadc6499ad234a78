//! `cancelSubmission`

use crate::client::{ApiRequest, CwsClient};
use crate::error::ApiResult;
use crate::types::{CancelSubmissionResponse, ItemName};
use reqwest::Method;
use std::time::Duration;

/// Call builder for cancelling a pending submission
#[derive(Debug)]
#[must_use = "call builders do nothing until `send` is awaited"]
pub struct CancelSubmissionCall {
    client: CwsClient,
    name: ItemName,
    timeout: Option<Duration>,
}

impl CancelSubmissionCall {
    pub(crate) fn new(client: CwsClient, name: ItemName) -> Self {
        Self {
            client,
            name,
            timeout: None,
        }
    }

    /// Deadline for this request, overriding the client timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Execute the request
    pub async fn send(self) -> ApiResult<CancelSubmissionResponse> {
        let url = self.client.method_url(&self.name, "cancelSubmission");
        let request = ApiRequest::new(Method::POST, url).timeout(self.timeout);
        self.client.execute(request).await
    }
}
