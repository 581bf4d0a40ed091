//! Sosign API Gateway Library
//!
//! A stateless HTTP gateway fronting the Sosign petition platform's backend
//! API. Each browser-facing `/api/**` route validates minimal input, checks
//! credential presence where required, forwards the request once to the
//! configured upstream, and relays the upstream's JSON body and status.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
