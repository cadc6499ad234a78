//! Package uploads against a mock server

mod common;

use common::{item, upload_path, MockServer};
use cws_api_client::{ApiError, UploadState};

const UPLOAD_OK: &str = r#"{
    "name": "publishers/pub-1/items/item-1",
    "itemId": "item-1",
    "crxVersion": "1.4.0",
    "uploadState": "SUCCEEDED"
}"#;

#[tokio::test]
async fn test_upload_sends_raw_bytes_to_upload_host() {
    let server = MockServer::start().await;
    server.respond(&upload_path(), 200, UPLOAD_OK);

    let package = b"PK\x03\x04fake-zip".to_vec();
    let response = server
        .client()
        .media()
        .upload(&item())
        .media(package.clone(), "application/zip")
        .send()
        .await
        .unwrap();

    assert_eq!(response.upload_state, UploadState::Succeeded);
    assert_eq!(response.crx_version, "1.4.0");
    assert!(response.item_error.is_empty());

    let request = server.single_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, upload_path());
    assert_eq!(request.header("content-type"), Some("application/zip"));
    assert_eq!(request.body, package);
}

#[tokio::test]
async fn test_upload_media_type() {
    let server = MockServer::start().await;
    server.respond(&upload_path(), 200, UPLOAD_OK);
    let media = server.client().media();

    media
        .upload(&item())
        .media(vec![1, 2, 3], "application/x-chrome-extension")
        .send()
        .await
        .unwrap();

    // An empty media type keeps the zip default
    media
        .upload(&item())
        .media(vec![4, 5, 6], "")
        .send()
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(
        requests[0].header("content-type"),
        Some("application/x-chrome-extension")
    );
    assert_eq!(requests[1].header("content-type"), Some("application/zip"));
}

#[tokio::test]
async fn test_upload_without_media_fails_before_sending() {
    let server = MockServer::start().await;

    let err = server.client().media().upload(&item()).send().await.unwrap_err();

    assert!(matches!(err, ApiError::MissingMedia));
    assert_eq!(err.to_string(), "media is required for upload");
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_upload_failure_details() {
    let server = MockServer::start().await;
    server.respond(
        &upload_path(),
        200,
        r#"{
            "itemId": "item-1",
            "uploadState": "FAILED",
            "itemError": [{"errorCode": "PKG_INVALID_VERSION", "errorDetail": "Version must be greater"}]
        }"#,
    );

    let response = server
        .client()
        .media()
        .upload(&item())
        .media(vec![0u8; 16], "application/zip")
        .send()
        .await
        .unwrap();

    assert_eq!(response.upload_state, UploadState::Failed);
    assert_eq!(response.item_error[0].error_code, "PKG_INVALID_VERSION");
}
