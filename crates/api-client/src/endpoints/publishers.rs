//! Publisher and item resources

use crate::client::CwsClient;
use crate::endpoints::{
    CancelSubmissionCall, FetchStatusCall, PublishCall, SetPublishedDeployPercentageCall,
};
use crate::types::ItemName;

/// Publishers API interface
#[derive(Clone, Debug)]
pub struct PublishersApi {
    client: CwsClient,
}

impl PublishersApi {
    pub(crate) fn new(client: CwsClient) -> Self {
        Self { client }
    }

    /// Access the items of a publisher
    #[must_use]
    pub fn items(&self) -> ItemsApi {
        ItemsApi::new(self.client.clone())
    }
}

/// Items API interface
///
/// All methods address an item by its full resource name.
#[derive(Clone, Debug)]
pub struct ItemsApi {
    client: CwsClient,
}

impl ItemsApi {
    pub(crate) fn new(client: CwsClient) -> Self {
        Self { client }
    }

    /// Fetch the review and rollout status of an item
    ///
    /// GET /v2/{name}:fetchStatus
    #[must_use]
    pub fn fetch_status(&self, name: &ItemName) -> FetchStatusCall {
        FetchStatusCall::new(self.client.clone(), name.clone())
    }

    /// Submit the current draft for review and publication
    ///
    /// POST /v2/{name}:publish
    #[must_use]
    pub fn publish(&self, name: &ItemName) -> PublishCall {
        PublishCall::new(self.client.clone(), name.clone())
    }

    /// Withdraw a submission that is pending review
    ///
    /// POST /v2/{name}:cancelSubmission
    #[must_use]
    pub fn cancel_submission(&self, name: &ItemName) -> CancelSubmissionCall {
        CancelSubmissionCall::new(self.client.clone(), name.clone())
    }

    /// Change the rollout percentage of the published revision
    ///
    /// POST /v2/{name}:setPublishedDeployPercentage
    #[must_use]
    pub fn set_published_deploy_percentage(
        &self,
        name: &ItemName,
    ) -> SetPublishedDeployPercentageCall {
        SetPublishedDeployPercentageCall::new(self.client.clone(), name.clone())
    }
}
