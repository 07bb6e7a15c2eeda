//! Convention-Based HTTP Request Router
//!
//! Discovers routes from annotations in handler file headers, serves them
//! with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │              CONVENTION ROUTER               │
//!                      │                                              │
//!     Client Request   │  ┌─────────┐   ┌────────────┐   ┌─────────┐ │
//!     ─────────────────┼─▶│  http   │──▶│ dispatcher │──▶│ handler │ │
//!                      │  │ server  │   │ match/auth │   │ runner  │ │
//!                      │  └─────────┘   └─────┬──────┘   └─────────┘ │
//!                      │                      │                      │
//!                      │                ┌─────▼──────┐               │
//!                      │                │ route table│               │
//!                      │                │ (immutable)│               │
//!                      │                └─────┬──────┘               │
//!                      │         built once at startup from:         │
//!                      │  ┌─────────────┐         ┌───────────────┐  │
//!                      │  │ route cache │ ──or──  │ handler scan  │  │
//!                      │  └─────────────┘         └───────────────┘  │
//!                      │                                              │
//!                      │  Cross-cutting: config, observability        │
//!                      └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use convention_router::config::{self, RouterConfig};
use convention_router::dispatch::{Dispatcher, EchoRunner};
use convention_router::http::HttpServer;
use convention_router::observability::{logging, metrics};
use convention_router::routing::{RouteCache, RouteTable};

#[derive(Parser)]
#[command(name = "convention-router")]
#[command(about = "Convention-based HTTP request router", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => RouterConfig::default(),
    };

    let level = &config.observability.log_level;
    logging::init(&format!("convention_router={level},tower_http={level}"));

    tracing::info!("convention-router v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_prefix = %config.api.prefix,
        handler_root = %config.handlers.root.display(),
        cache_path = %config.cache.path.display(),
        "Configuration loaded"
    );

    // Build the route table exactly once, before serving.
    let cache = RouteCache::new(&config.cache.path);
    let (table, source) =
        RouteTable::load_or_scan(&cache, &config.handlers.root, &config.handlers.convention)?;
    tracing::info!(routes = table.len(), source = ?source, "Route table ready");

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // The echo runner stands in for a real execution environment; embedders
    // construct their own Dispatcher with a HandlerRunner implementation
    // (and an auth predicate, without which auth-guarded routes deny).
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(table),
        config.api.prefix.clone(),
        Arc::new(EchoRunner),
    ));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config, dispatcher);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
