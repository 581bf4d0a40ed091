//! Gateway error taxonomy.
//!
//! Four terminal outcomes, mapped straight onto the JSON envelope the
//! frontend expects:
//! - missing input field → 400, detected before any upstream call
//! - missing credential → 401, detected before any upstream call
//! - upstream non-2xx → the upstream's own status, message wrapped
//! - gateway fault (network/parse) → 500 with a generic message; the
//!   underlying error is logged, never sent to the caller

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::http::response::failure;

/// Terminal error for a single gateway request. Nothing is retried.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required input field was absent or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The resource requires a caller identity and none was presented.
    #[error("Authorization token required")]
    AuthRequired,

    /// The upstream answered with a non-2xx status. Relayed faithfully.
    #[error("upstream returned {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    /// The gateway itself failed to reach or parse the upstream.
    #[error("internal gateway failure")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Internal(Box::new(e))
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Internal(Box::new(e))
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GatewayError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("{} is required", field),
            ),
            GatewayError::AuthRequired => (
                StatusCode::UNAUTHORIZED,
                "Authorization token required".to_string(),
            ),
            GatewayError::Upstream { status, message } => (status, message),
            GatewayError::Internal(source) => {
                // Detail stays in the log; the caller gets a generic message.
                tracing::error!(error = %source, "Gateway failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(failure(message))).into_response()
    }
}
