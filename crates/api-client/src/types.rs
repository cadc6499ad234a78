//! Request and response shapes of the Chrome Web Store API v2
//!
//! Field names follow the vendor's camelCase JSON. Every response field is
//! optional on the wire, so structs default missing fields. Response enums keep
//! values this crate does not know yet in an `Other` variant.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Resource names
// ============================================================================

/// Resource name of a store item: `publishers/{publisherId}/items/{itemId}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemName {
    publisher_id: String,
    item_id: String,
}

impl ItemName {
    /// Build a name from publisher and item ids
    pub fn new(publisher_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            publisher_id: publisher_id.into(),
            item_id: item_id.into(),
        }
    }

    /// Publisher id segment
    #[must_use]
    pub fn publisher_id(&self) -> &str {
        &self.publisher_id
    }

    /// Item id segment
    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "publishers/{}/items/{}", self.publisher_id, self.item_id)
    }
}

impl FromStr for ItemName {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('/').collect();
        match segments.as_slice() {
            ["publishers", publisher, "items", item] if !publisher.is_empty() && !item.is_empty() => {
                Ok(Self::new(*publisher, *item))
            }
            _ => Err(ApiError::InvalidItemName(format!(
                "expected publishers/{{publisherId}}/items/{{itemId}}, got {s:?}"
            ))),
        }
    }
}

impl Serialize for ItemName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Declares a response enum whose unknown wire values survive a round trip
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value this crate does not know yet, kept verbatim
            Other(String),
        }

        impl $name {
            /// Value as sent on the wire
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(value) => value,
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                Ok(Self::from(value.as_str()))
            }
        }
    };
}

wire_enum! {
    /// Review / publication state of an item revision
    pub enum ItemState {
        /// No state reported
        #[default]
        Unspecified => "STATE_UNSPECIFIED",
        /// Submitted and waiting for review
        PendingReview => "PENDING_REVIEW",
        /// Approved and held until published
        Staged => "STAGED",
        /// Live for all users
        Published => "PUBLISHED",
        /// Live for trusted testers only
        PublishedToTesters => "PUBLISHED_TO_TESTERS",
        /// Failed review
        Rejected => "REJECTED",
        /// Submission withdrawn
        Cancelled => "CANCELLED",
        /// Not yet submitted (older API revisions)
        Draft => "DRAFT",
        /// Removed from the store (older API revisions)
        TakenDown => "TAKEN_DOWN",
        /// Never published (older API revisions)
        NotPublished => "NOT_PUBLISHED",
        /// Suspended by the store (older API revisions)
        Suspended => "SUSPENDED",
        /// Under review (older API revisions)
        InReview => "IN_REVIEW",
        /// Approved and about to go live (older API revisions)
        PendingPublish => "PENDING_PUBLISH",
    }
}

wire_enum! {
    /// State of the most recent package upload
    pub enum UploadState {
        /// No state reported
        #[default]
        Unspecified => "UPLOAD_STATE_UNSPECIFIED",
        /// The package was accepted
        Succeeded => "SUCCEEDED",
        /// The package is still being processed
        InProgress => "IN_PROGRESS",
        /// The package was rejected
        Failed => "FAILED",
        /// No upload exists
        NotFound => "NOT_FOUND",
    }
}

wire_enum! {
    /// Operation status code reported in response bodies
    pub enum StatusCode {
        /// No status reported
        #[default]
        Unspecified => "STATUS_CODE_UNSPECIFIED",
        /// The operation succeeded
        Ok => "OK",
        /// The item is malformed
        InvalidItem => "INVALID_ITEM",
        /// The caller may not modify the item
        Unauthorized => "UNAUTHORIZED",
        /// The item does not exist
        NotFound => "NOT_FOUND",
        /// The item changed concurrently
        Conflict => "CONFLICT",
        /// The store failed internally
        InternalError => "INTERNAL_ERROR",
        /// The developer account is not in good standing
        InvalidDeveloper => "INVALID_DEVELOPER",
        /// Too many requests
        RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
    }
}

/// How a submitted revision goes live once approved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PublishType {
    /// Let the store decide
    #[default]
    #[serde(rename = "PUBLISH_TYPE_UNSPECIFIED")]
    Unspecified,
    /// Publish as soon as review passes
    #[serde(rename = "DEFAULT_PUBLISH")]
    Immediate,
    /// Hold in a staged state until explicitly published
    #[serde(rename = "STAGED_PUBLISH")]
    Staged,
}

impl FromStr for PublishType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "immediate" | "default" | "default_publish" => Ok(Self::Immediate),
            "staged" | "staged_publish" => Ok(Self::Staged),
            other => Err(ApiError::invalid_argument(format!(
                "unknown publish type {other:?} (expected immediate or staged)"
            ))),
        }
    }
}

/// Which revision `fetchStatus` reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Projection {
    /// The submitted revision
    Draft,
    /// The revision users receive
    Published,
}

impl Projection {
    /// Wire value used in the `projection` query parameter
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
        }
    }
}

impl FromStr for Projection {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            other => Err(ApiError::invalid_argument(format!(
                "unknown projection {other:?} (expected DRAFT or PUBLISHED)"
            ))),
        }
    }
}

macro_rules! display_via_serde {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    match serde_json::to_value(self) {
                        Ok(serde_json::Value::String(s)) => f.write_str(&s),
                        _ => write!(f, "{self:?}"),
                    }
                }
            }
        )+
    };
}

display_via_serde!(PublishType, Projection);

// ============================================================================
// fetchStatus
// ============================================================================

/// A rollout channel of a revision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DistributionChannel {
    /// Share of users receiving this version (0-100)
    pub deploy_percentage: u8,
    /// Extension package version
    pub crx_version: String,
}

/// Status of one revision (published or submitted) of an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemRevisionStatus {
    /// Review or publication state
    pub state: ItemState,
    /// Rollout channels of this revision
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub distribution_channels: Vec<DistributionChannel>,
}

impl ItemRevisionStatus {
    /// Version of the first distribution channel
    #[must_use]
    pub fn current_version(&self) -> Option<&str> {
        self.distribution_channels
            .first()
            .map(|c| c.crx_version.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// Response of `fetchStatus`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemStatus {
    /// Resource name of the item
    pub name: String,
    /// Item (extension) ID
    pub item_id: String,
    /// Public key of the extension
    #[serde(skip_serializing_if = "String::is_empty")]
    pub public_key: String,
    /// Revision users currently receive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_item_revision_status: Option<ItemRevisionStatus>,
    /// Revision awaiting review or publication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_item_revision_status: Option<ItemRevisionStatus>,
    /// Outcome of the latest asynchronous upload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_async_upload_state: Option<UploadState>,
    /// Whether the store took the item down
    pub taken_down: bool,
    /// Whether the item received a policy warning
    pub warned: bool,
}

// ============================================================================
// publish
// ============================================================================

/// Deployment parameters attached to a publish request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployInfo {
    /// Share of users receiving the new version (0-100)
    pub deploy_percentage: u8,
}

/// Body of `publish`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishRequest {
    /// Immediate or staged publication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_type: Option<PublishType>,
    /// Initial rollout
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deploy_infos: Vec<DeployInfo>,
    /// Ask the store to skip review when the change allows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_review: Option<bool>,
}

/// Response of `publish`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishResponse {
    /// Resource name of the item
    pub name: String,
    /// Item (extension) ID
    pub item_id: String,
    /// State of the submitted revision
    pub state: ItemState,
}

// ============================================================================
// upload
// ============================================================================

/// Response of `media.upload`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadResponse {
    /// Resource name of the item
    pub name: String,
    /// Item (extension) ID
    pub item_id: String,
    /// Version declared in the uploaded manifest
    #[serde(skip_serializing_if = "String::is_empty")]
    pub crx_version: String,
    /// Outcome of the upload
    pub upload_state: UploadState,
    /// Reasons a failed upload was rejected
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub item_error: Vec<ItemError>,
}

/// Item-level failure detail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemError {
    /// Machine-readable reason, e.g. `PKG_INVALID_ZIP`
    pub error_code: String,
    /// Human-readable explanation
    pub error_detail: String,
}

// ============================================================================
// setPublishedDeployPercentage / cancelSubmission
// ============================================================================

/// Response of `setPublishedDeployPercentage`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetPublishedDeployPercentageResponse {
    /// Outcome of the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<StatusCode>,
    /// Explanations accompanying the status code
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status_detail: Vec<String>,
}

/// Response of `cancelSubmission`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CancelSubmissionResponse {
    /// Outcome of the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<StatusCode>,
    /// Explanations accompanying the status code
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status_detail: Vec<String>,
}
