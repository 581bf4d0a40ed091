//! Sosign API Gateway
//!
//! A stateless forwarding gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                   GATEWAY                     │
//!                        │                                               │
//!   Browser Request      │  ┌─────────┐   ┌──────────┐   ┌───────────┐ │
//!   ─────────────────────┼─▶│  http   │──▶│  routes  │──▶│ upstream  │─┼──▶ Backend API
//!                        │  │ server  │   │ handlers │   │ forwarder │ │
//!                        │  └─────────┘   └──────────┘   └─────┬─────┘ │
//!                        │                                      │       │
//!   Browser Response     │       relay (status + JSON body)     │       │
//!   ◀────────────────────┼──────────────────────────────────────┘       │
//!                        │                                               │
//!                        │  ┌─────────────────────────────────────────┐ │
//!                        │  │          Cross-Cutting Concerns          │ │
//!                        │  │  ┌────────┐ ┌────────────┐ ┌──────────┐ │ │
//!                        │  │  │ config │ │ observa-   │ │lifecycle │ │ │
//!                        │  │  │        │ │ bility     │ │          │ │ │
//!                        │  │  └────────┘ └────────────┘ └──────────┘ │ │
//!                        │  └─────────────────────────────────────────┘ │
//!                        └──────────────────────────────────────────────┘
//! ```
//!
//! The gateway is stateless: no caching, no retries, no token inspection.
//! Every request is validated, forwarded once, and relayed.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use sosign_gateway::config::loader::{default_config, load_config};
use sosign_gateway::lifecycle::Shutdown;
use sosign_gateway::observability::{logging, metrics};
use sosign_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "sosign-gateway")]
#[command(about = "API gateway for the Sosign petition platform", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };

    logging::init(&config.observability);

    tracing::info!("sosign-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
