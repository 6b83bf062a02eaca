#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_openai::build_router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Build a POST request with a JSON body.
pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn raw_request(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Response captured from a one-shot call against a fresh router.
pub struct Captured {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf-8 body")
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.text()))
    }

    /// Split an SSE body into the JSON payload of each `data:` frame.
    pub fn sse_frames(&self) -> Vec<Value> {
        parse_sse(&self.text())
    }
}

pub async fn send(req: Request<Body>) -> Captured {
    let resp = build_router().oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(http::header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    Captured {
        status,
        content_type,
        body,
    }
}

/// Every frame must be `data: <json>` followed by a blank line.
pub fn parse_sse(text: &str) -> Vec<Value> {
    assert!(text.ends_with("\n\n"), "stream must end on a frame boundary: {text:?}");
    text.split_terminator("\n\n")
        .map(|frame| {
            let payload = frame
                .strip_prefix("data: ")
                .unwrap_or_else(|| panic!("frame without data prefix: {frame:?}"));
            assert!(!payload.contains('\n'), "multi-line frame: {frame:?}");
            serde_json::from_str(payload).unwrap()
        })
        .collect()
}

/// The real router bound to an ephemeral local port.
pub struct TestServer {
    pub base_url: String,
    pub addr: SocketAddr,
    join: JoinHandle<()>,
    client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("test listener local addr");
        let join = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, build_router()).await {
                eprintln!("Test server error: {err:?}");
            }
        });

        TestServer {
            base_url: format!("http://{}", addr),
            addr,
            join,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("failed building reqwest client"),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.join.abort();
    }
}
