//! Browser-facing API routes.
//!
//! One module per backend resource. Every handler follows the same linear
//! shape: extract → validate required fields → check credential presence →
//! forward once → relay. Validation and the auth check both run before any
//! network call.

use axum::body::Bytes;
use axum::Router;
use serde_json::Value;

use crate::http::server::AppState;
use crate::upstream::GatewayError;

pub mod comments;
pub mod download_requests;
pub mod hide_requests;

/// Assemble the full `/api` surface.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(comments::router())
        .merge(download_requests::router())
        .merge(hide_requests::router())
}

/// Parse an inbound JSON body, treating an absent or malformed body as null.
///
/// Required-field checks on null then produce the usual 400, which matches
/// how the frontend reports an empty submission.
pub(crate) fn parse_json(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

/// Require a field to be present and non-empty.
pub(crate) fn require<'a>(
    body: &'a Value,
    field: &'static str,
) -> Result<&'a Value, GatewayError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(GatewayError::MissingField(field)),
        Some(Value::String(s)) if s.is_empty() => Err(GatewayError::MissingField(field)),
        Some(value) => Ok(value),
    }
}
