//! Hide-request resource handlers.
//!
//! Mirrors the download-request pair: an eligibility check plus a create,
//! both body/query passthrough with optional authorization.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};

use crate::http::server::AppState;
use crate::routes::parse_json;
use crate::upstream::{bearer, AuthPolicy, GatewayError, Relay};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/hide-requests", post(create))
        .route("/api/hide-requests/check/{petition_id}", get(check))
}

/// GET /api/hide-requests/check/{petition_id} — hide-request status.
async fn check(
    State(state): State<AppState>,
    Path(petition_id): Path<String>,
    headers: HeaderMap,
) -> Result<Relay, GatewayError> {
    let auth = bearer(&headers, AuthPolicy::Optional)?;

    state
        .upstream
        .forward(
            Method::GET,
            &format!("/api/hide-requests/check/{}", petition_id),
            &[],
            auth.as_deref(),
            None,
        )
        .await
}

/// POST /api/hide-requests — file a new hide request.
async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Relay, GatewayError> {
    let auth = bearer(&headers, AuthPolicy::Optional)?;

    let payload = match parse_json(&body) {
        Value::Null => json!({}),
        value => value,
    };

    state
        .upstream
        .forward(
            Method::POST,
            "/api/hide-requests",
            &[],
            auth.as_deref(),
            Some(&payload),
        )
        .await
}
