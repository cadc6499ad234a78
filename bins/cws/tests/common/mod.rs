#![allow(dead_code)]

use assert_cmd::Command;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const PUBLISHER: &str = "pub-1";
pub const ITEM: &str = "item-1";

/// A `cws` command isolated from the caller's environment and config files
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cws").expect("cws binary");
        cmd.env_clear()
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join(".config"))
            .env("NO_COLOR", "1")
            .current_dir(self.dir.path());
        cmd
    }

    /// `cmd()` with item IDs and an access token
    pub fn authed_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("CHROME_WEBSTORE_PUBLISHER_ID", PUBLISHER)
            .env("CHROME_WEBSTORE_ITEM_ID", ITEM)
            .env("CHROME_WEBSTORE_ACCESS_TOKEN", "test-token");
        cmd
    }

    pub fn write(&self, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

/// Chrome Web Store stand-in running on its own thread
pub struct MockStore {
    pub url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl MockStore {
    pub fn start() -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(handle).with_state(seen.clone());

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock");
        listener.set_nonblocking(true).expect("nonblocking");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                axum::serve(listener, app).await.expect("serve");
            });
        });

        Self { url, seen }
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

async fn handle(
    State(seen): State<Arc<Mutex<Vec<Seen>>>>,
    method: Method,
    uri: Uri,
    headers: axum::http::HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    seen.lock().unwrap().push(Seen {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });

    let item = format!("publishers/{PUBLISHER}/items/{ITEM}");
    let json = |body: String| (StatusCode::OK, body).into_response();

    if path == format!("/v2/{item}:fetchStatus") {
        json(format!(
            r#"{{"name": "{item}", "itemId": "{ITEM}",
                "publishedItemRevisionStatus": {{"state": "PUBLISHED",
                    "distributionChannels": [{{"deployPercentage": 100, "crxVersion": "3.1.4"}}]}},
                "submittedItemRevisionStatus": {{"state": "PUBLISHED_TO_BETA"}},
                "lastAsyncUploadState": "SUCCEEDED"}}"#
        ))
    } else if path == format!("/v2/{item}:publish") {
        json(format!(r#"{{"name": "{item}", "itemId": "{ITEM}", "state": "PENDING_REVIEW"}}"#))
    } else if path == format!("/v2/{item}:setPublishedDeployPercentage") {
        json(r#"{"statusCode": "OK"}"#.to_string())
    } else if path == format!("/upload/v2/{item}:upload") {
        if body.is_empty() {
            json(r#"{"uploadState": "FAILED", "itemError": [{"errorCode": "PKG_EMPTY", "errorDetail": "Empty package"}]}"#.to_string())
        } else {
            json(format!(r#"{{"name": "{item}", "itemId": "{ITEM}", "crxVersion": "3.2.0", "uploadState": "SUCCEEDED"}}"#))
        }
    } else {
        (
            StatusCode::NOT_FOUND,
            r#"{"error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND"}}"#,
        )
            .into_response()
    }
}
