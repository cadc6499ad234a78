//! Resource APIs and their call builders
//!
//! Each API method returns a call object that accumulates optional
//! parameters and issues exactly one request when `send()` is awaited.
//!
//! ## Mapping to the Chrome Web Store API v2
//!
//! | Builder | HTTP | Path |
//! |---------|------|------|
//! | [`FetchStatusCall`] | `GET` | `/v2/{name}:fetchStatus` |
//! | [`PublishCall`] | `POST` | `/v2/{name}:publish` |
//! | [`CancelSubmissionCall`] | `POST` | `/v2/{name}:cancelSubmission` |
//! | [`SetPublishedDeployPercentageCall`] | `POST` | `/v2/{name}:setPublishedDeployPercentage` |
//! | [`UploadCall`] | `POST` | `/upload/v2/{name}:upload` |

pub mod cancel_submission;
pub mod deploy_percentage;
pub mod fetch_status;
pub mod media;
pub mod publish;
pub mod publishers;

pub use cancel_submission::CancelSubmissionCall;
pub use deploy_percentage::SetPublishedDeployPercentageCall;
pub use fetch_status::FetchStatusCall;
pub use media::{MediaApi, UploadCall};
pub use publish::PublishCall;
pub use publishers::{ItemsApi, PublishersApi};
