//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define gateway metrics (RPS, latency, status codes)
//! - Expose Prometheus-compatible metrics endpoint
//! - Track per-resource and aggregate metrics
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, resource, status
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Resource label is the matched route template, not the raw path,
//!   so petition IDs never explode label cardinality
//! - Exporter runs on its own listener, separate from the gateway port

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter on its own address.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed gateway request.
pub fn record_request(method: &str, status: u16, resource: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("resource", resource.to_string()),
        ("status", status.to_string()),
    ];

    metrics::counter!("gateway_requests_total", &labels).increment(1);
    metrics::histogram!("gateway_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
