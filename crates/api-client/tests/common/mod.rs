//! In-process mock of the Chrome Web Store API

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use cws_api_client::{ClientConfig, CwsClient, ItemName};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const TEST_TOKEN: &str = "test-token";

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone)]
struct Canned {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<HashMap<String, Canned>>>,
}

pub struct MockServer {
    pub base_url: String,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    /// Answer requests to `path` with `status` and `body`
    pub fn respond(&self, path: &str, status: u16, body: impl Into<String>) {
        self.state.responses.lock().unwrap().insert(
            path.to_string(),
            Canned {
                status,
                body: body.into(),
                delay: None,
            },
        );
    }

    /// Like [`respond`](Self::respond) but waits before answering
    pub fn respond_after(&self, path: &str, delay: Duration, body: impl Into<String>) {
        self.state.responses.lock().unwrap().insert(
            path.to_string(),
            Canned {
                status: 200,
                body: body.into(),
                delay: Some(delay),
            },
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:#?}");
        requests.into_iter().next().unwrap()
    }

    /// Config pointing both hosts at this server
    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(&self.base_url)
            .with_upload_base_url(format!("{}/upload", self.base_url))
    }

    /// Client authenticated with [`TEST_TOKEN`]
    pub fn client(&self) -> CwsClient {
        CwsClient::new(self.config())
            .unwrap()
            .with_access_token(TEST_TOKEN)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn item() -> ItemName {
    ItemName::new("pub-1", "item-1")
}

pub fn item_path(verb: &str) -> String {
    format!("/v2/publishers/pub-1/items/item-1:{verb}")
}

pub fn upload_path() -> String {
    format!("/upload{}", item_path("upload"))
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body: body.to_vec(),
    });

    let canned = state.responses.lock().unwrap().get(&path).cloned();
    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(canned.status).unwrap();
            (status, [(CONTENT_TYPE, "application/json")], canned.body).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            r#"{"error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND"}}"#,
        )
            .into_response(),
    }
}
