//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Route handler
//!     → auth.rs (presence check, opaque pass-through)
//!     → client.rs (build URL, forward once, parse JSON)
//!     → Relay (2xx: status + body untouched)
//!     → error.rs (400/401/relayed upstream error/500 envelope)
//! ```
//!
//! # Design Decisions
//! - Stateless: nothing survives a single request
//! - Exactly one upstream attempt per inbound request
//! - Input and auth errors are decided before any network call

pub mod auth;
pub mod client;
pub mod error;

pub use auth::{bearer, AuthPolicy};
pub use client::{Relay, Upstream};
pub use error::GatewayError;
