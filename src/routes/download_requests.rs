//! Download-request resource handlers.
//!
//! Authorization is optional on all three endpoints — the header is
//! forwarded when present and the upstream decides what anonymous callers
//! may see. The download endpoint is the one response-shaping special case
//! in the gateway: on success it re-wraps the upstream JSON as a file
//! attachment so the browser saves it instead of rendering it.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};

use crate::http::server::AppState;
use crate::routes::parse_json;
use crate::upstream::{bearer, AuthPolicy, GatewayError, Relay};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/download-requests", post(create))
        .route("/api/download-requests/check/{petition_id}", get(check))
        .route("/api/download-requests/download/{petition_id}", get(download))
}

/// GET /api/download-requests/check/{petition_id} — download eligibility.
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
            &format!("/api/download-requests/check/{}", petition_id),
            &[],
            auth.as_deref(),
            None,
        )
        .await
}

/// GET /api/download-requests/download/{petition_id} — petition data export.
///
/// On upstream success the JSON body is pretty-printed and served with
/// `Content-Disposition: attachment` to trigger a file save. Upstream
/// errors relay as the usual inline JSON envelope.
async fn download(
    State(state): State<AppState>,
    Path(petition_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let auth = bearer(&headers, AuthPolicy::Optional)?;

    let relay = state
        .upstream
        .forward(
            Method::GET,
            &format!("/api/download-requests/download/{}", petition_id),
            &[],
            auth.as_deref(),
            None,
        )
        .await?;

    let pretty = serde_json::to_string_pretty(&relay.body)?;
    let disposition = format!(
        "attachment; filename=\"petition-{}-data.json\"",
        petition_id
    );

    Ok((
        relay.status,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pretty,
    )
        .into_response())
}

/// POST /api/download-requests — file a new download request.
///
/// The body is passed through as a JSON object; the upstream owns its shape.
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
            "/api/download-requests",
            &[],
            auth.as_deref(),
            Some(&payload),
        )
        .await
}
