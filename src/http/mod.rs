//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (stamp request ID, echo it on the response)
//!     → routes/* (per-resource handlers)
//!     → upstream forwarder
//!     → response.rs (envelope shaping for errors)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{propagate_request_id, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
