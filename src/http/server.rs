//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all resource handlers
//! - Wire up middleware (tracing, limits, timeout, request ID)
//! - Share the upstream forwarder with handlers via state
//! - Serve with graceful shutdown

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::request::{propagate_request_id, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routes;
use crate::upstream::Upstream;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<Upstream>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the upstream HTTP client cannot be constructed.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let upstream = Arc::new(Upstream::new(&config.upstream)?);
        let state = AppState { upstream };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request-ID middleware sits outermost so the trace span below it
    /// already sees the stamped header.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        routes::api_router()
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(middleware::from_fn(propagate_request_id))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops when the shutdown channel fires or on Ctrl+C.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Root span for one gateway request, tagged with the correlation ID.
fn request_span(request: &Request) -> tracing::Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Per-route middleware recording request count and latency.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    // Matched route template, not the raw path, to bound label cardinality.
    let resource = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    metrics::record_request(method.as_str(), response.status().as_u16(), &resource, start);
    response
}

/// Wait for either the internal shutdown channel or Ctrl+C.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = shutdown.recv() => {
            tracing::info!("Shutdown triggered");
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            }
            tracing::info!("Shutdown signal received");
        }
    }
}
