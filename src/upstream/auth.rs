//! Opaque credential pass-through.
//!
//! The gateway never decodes, verifies, or trusts the Authorization header.
//! It only checks for presence where a resource demands a caller identity,
//! and forwards the raw value byte-for-byte. Trust decisions belong to the
//! upstream.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::upstream::error::GatewayError;

/// Whether a resource needs a credential present at the gateway boundary.
///
/// Comment mutations are `Required`; download/hide requests are `Optional`
/// and defer entirely to the upstream's own checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    Required,
    Optional,
}

/// Extract the Authorization header as an opaque string.
///
/// Returns `Err(AuthRequired)` only when the policy is `Required` and the
/// header is absent or not valid UTF-8. The value is never parsed.
pub fn bearer(headers: &HeaderMap, policy: AuthPolicy) -> Result<Option<String>, GatewayError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    match (token, policy) {
        (Some(t), _) => Ok(Some(t)),
        (None, AuthPolicy::Optional) => Ok(None),
        (None, AuthPolicy::Required) => Err(GatewayError::AuthRequired),
    }
}
