//! Front door service.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────┐
//!                     │                  FRONT DOOR                   │
//!   Client Request    │  ┌──────────┐   ┌──────────────┐              │
//!   ──────────────────┼─▶│  access  │──▶│   handlers   │              │
//!                     │  │  policy  │   └──┬────────┬──┘              │
//!                     │  └──────────┘      │        │                 │
//!                     │          /api/...  ▼        ▼  /health        │
//!                     │          ┌───────────┐  ┌──────────┐          │
//!                     │          │ forwarder │  │  prober  │──────────┼──▶ GET <svc>/health
//!                     │          └─────┬─────┘  └──────────┘          │     (all services)
//!                     │                │ registry lookup              │
//!   Client Response   │                ▼                              │
//!   ◀─────────────────┼──────── streamed relay ◀─────────────────────┼─── Backend
//!                     │                                               │
//!                     │  ┌─────────────────────────────────────────┐  │
//!                     │  │ sentinel: 30s ticker over internal      │  │
//!                     │  │ blocks, failure hook per block          │  │
//!                     │  └─────────────────────────────────────────┘  │
//!                     └───────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use front_door::config::load_config;
use front_door::lifecycle::{wait_for_signal, Shutdown};
use front_door::observability::{logging, metrics};
use front_door::{EndpointRegistry, HttpServer, Sentinel};

#[derive(Parser)]
#[command(name = "front-door", version)]
#[command(about = "Proxy, aggregate health and sentinel for the backend services", long_about = None)]
struct Args {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(short, long, env = "FRONTDOOR_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init(&config.observability.log_level);
    tracing::info!("front-door v{} starting", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(EndpointRegistry::from_config(&config.services)?);
    for endpoint in registry.list_all() {
        tracing::info!(service = %endpoint.name(), address = %endpoint.base_address(), "Registered service");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        mode = ?config.mode,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let sentinel = Sentinel::new(&config.sentinel);
    let server = HttpServer::new(config, registry, sentinel);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
