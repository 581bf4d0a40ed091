//! Shared utilities for integration testing.

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Everything the mock saw on its most recent request.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

struct MockState {
    status: u16,
    body: Value,
    hits: AtomicU32,
    last: Mutex<Option<ReceivedRequest>>,
}

/// A programmable mock backend that records what it receives.
pub struct MockUpstream {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests that reached the mock.
    pub fn hits(&self) -> u32 {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// The most recent request, if any arrived.
    pub fn last_request(&self) -> Option<ReceivedRequest> {
        self.state.last.lock().unwrap().clone()
    }
}

/// Start a mock upstream answering every request with a fixed status/body.
pub async fn start_mock_upstream(status: u16, body: Value) -> MockUpstream {
    let state = Arc::new(MockState {
        status,
        body,
        hits: AtomicU32::new(0),
        last: Mutex::new(None),
    });

    let app = Router::new()
        .fallback(capture)
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, state }
}

async fn capture(State(state): State<Arc<MockState>>, request: Request) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    *state.last.lock().unwrap() = Some(ReceivedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_owned),
        authorization: parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body: serde_json::from_slice(&bytes).ok(),
    });

    let status = StatusCode::from_u16(state.status).unwrap();
    (status, Json(state.body.clone())).into_response()
}
