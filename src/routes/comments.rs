//! Comment resource handlers.
//!
//! Mutations (create, like, reply) require a credential at the gateway
//! boundary; listing is open. Only whitelisted fields are forwarded — a
//! comment creation forwards `{petitionId, content}` and nothing else.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method};
use axum::routing::{get, post, put};
use axum::Router;
use serde::Deserialize;
use serde_json::json;

use crate::http::server::AppState;
use crate::routes::{parse_json, require};
use crate::upstream::{bearer, AuthPolicy, GatewayError, Relay};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/comments", post(create))
        .route("/api/comments/petition/{petition_id}", get(list_for_petition))
        .route("/api/comments/{id}/like", put(like))
        .route("/api/comments/{id}/reply", post(reply))
}

/// POST /api/comments — create a comment on a petition.
async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Relay, GatewayError> {
    let payload = parse_json(&body);
    let petition_id = require(&payload, "petitionId")?;
    let content = require(&payload, "content")?;
    let auth = bearer(&headers, AuthPolicy::Required)?;

    let forwarded = json!({
        "petitionId": petition_id,
        "content": content,
    });

    state
        .upstream
        .forward(
            Method::POST,
            "/api/comments",
            &[],
            auth.as_deref(),
            Some(&forwarded),
        )
        .await
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
}

/// GET /api/comments/petition/{petition_id} — paginated comment listing.
///
/// Missing `page`/`limit` default to `1`/`10` and are always forwarded
/// explicitly so the upstream sees a fully-specified query.
async fn list_for_petition(
    State(state): State<AppState>,
    Path(petition_id): Path<String>,
    Query(params): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Relay, GatewayError> {
    let auth = bearer(&headers, AuthPolicy::Optional)?;

    let mut query: Vec<(&str, String)> = vec![
        ("page", params.page.unwrap_or(1).to_string()),
        ("limit", params.limit.unwrap_or(10).to_string()),
    ];
    if let Some(search) = params.search {
        query.push(("search", search));
    }

    state
        .upstream
        .forward(
            Method::GET,
            &format!("/api/comments/petition/{}", petition_id),
            &query,
            auth.as_deref(),
            None,
        )
        .await
}

/// PUT /api/comments/{id}/like — toggle a like on a comment.
async fn like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Relay, GatewayError> {
    let auth = bearer(&headers, AuthPolicy::Required)?;

    state
        .upstream
        .forward(
            Method::PUT,
            &format!("/api/comments/{}/like", id),
            &[],
            auth.as_deref(),
            None,
        )
        .await
}

/// POST /api/comments/{id}/reply — reply to a comment.
async fn reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Relay, GatewayError> {
    let payload = parse_json(&body);
    let content = require(&payload, "content")?;
    let auth = bearer(&headers, AuthPolicy::Required)?;

    let forwarded = json!({ "content": content });

    state
        .upstream
        .forward(
            Method::POST,
            &format!("/api/comments/{}/reply", id),
            &[],
            auth.as_deref(),
            Some(&forwarded),
        )
        .await
}
