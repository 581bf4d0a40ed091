//! Response envelope helpers.
//!
//! Error and status responses share one JSON shape, `{success, message}`,
//! matching what the frontend's data-fetching hooks expect. Successful
//! relays are never reshaped — the upstream body passes through untouched.

use serde_json::{json, Value};

/// Build a `{ "success": false, "message": ... }` body.
pub fn failure(message: impl Into<String>) -> Value {
    json!({
        "success": false,
        "message": message.into(),
    })
}
