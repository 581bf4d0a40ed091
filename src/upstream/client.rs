//! The shared upstream forwarder.
//!
//! # Responsibilities
//! - Build the upstream URL from the configured base and a resource path
//! - Mirror the inbound method, forward the Authorization header verbatim
//! - Serialize the whitelisted JSON body (never arbitrary passthrough of
//!   raw bytes)
//! - Issue the request exactly once; no retries, no backoff, no breaker
//! - Relay the upstream status and JSON body; wrap non-2xx bodies in the
//!   `{success, message}` envelope
//!
//! # Design Decisions
//! - One `reqwest::Client` per process, shared via `Arc` in handler state
//! - Timeouts come from config; a timeout surfaces as a gateway fault (500)
//! - The gateway holds no state across requests

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::upstream::error::GatewayError;

/// Fallback message when a non-2xx upstream body carries no `message` field.
const UPSTREAM_FALLBACK_MESSAGE: &str = "Request failed";

/// A successful upstream round trip: status and JSON body, unmodified.
#[derive(Debug, Clone)]
pub struct Relay {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for Relay {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// HTTP client for the backend API.
pub struct Upstream {
    client: reqwest::Client,
    base_url: String,
}

impl Upstream {
    /// Build the forwarder from validated configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forward one request to the backend and relay its response.
    ///
    /// `query` pairs are appended to the URL; `auth` is the raw
    /// Authorization value, forwarded untouched when present; `body` is the
    /// already-whitelisted JSON payload for write methods.
    ///
    /// On a non-2xx upstream status this returns `GatewayError::Upstream`
    /// carrying that status and the upstream's own `message` (or a generic
    /// fallback), so the backend's error semantics are preserved. Network
    /// and parse failures become `GatewayError::Internal`.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        auth: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Relay, GatewayError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = auth {
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(method = %method, url = %url, error = %e, "Upstream unreachable");
            GatewayError::from(e)
        })?;

        let status = response.status();

        if status.is_success() {
            let body: Value = response.json().await.map_err(|e| {
                tracing::error!(method = %method, url = %url, error = %e, "Upstream returned malformed JSON");
                GatewayError::from(e)
            })?;
            tracing::debug!(method = %method, url = %url, status = %status, "Relayed upstream response");
            return Ok(Relay { status, body });
        }

        // Non-2xx: surface the upstream's own message inside the envelope.
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string());

        tracing::warn!(method = %method, url = %url, status = %status, "Upstream error relayed");
        Err(GatewayError::Upstream { status, message })
    }
}
