//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4), preserving a caller-supplied one
//! - Stamp the ID on the inbound request before tracing sees it
//! - Echo the ID on the response so callers can quote it when reporting
//!
//! # Design Decisions
//! - Runs outermost so the trace span and every log line carry the ID
//! - Plain axum middleware, same shape as the metrics middleware

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Stamp the request with a correlation ID and echo it on the response.
///
/// A caller-supplied `x-request-id` is preserved verbatim; otherwise a
/// fresh UUID is generated. The same value always comes back on the
/// response, success or error.
pub async fn propagate_request_id(mut request: Request, next: Next) -> Response {
    let id = match request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
    {
        Some(existing) => existing.to_string(),
        None => Uuid::new_v4().to_string(),
    };

    if let Ok(value) = HeaderValue::from_str(&id) {
        request.headers_mut().insert(X_REQUEST_ID, value);
    }

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}
