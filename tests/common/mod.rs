//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use convention_router::config::RouterConfig;
use convention_router::dispatch::{AuthPredicate, Dispatcher, EchoRunner};
use convention_router::http::HttpServer;
use convention_router::routing::{RouteCache, RouteTable};

/// Write one handler file, creating parent directories as needed.
pub fn write_handler(root: &Path, name: &str, header: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, header).unwrap();
}

/// Config rooted in a test directory: handlers under `<dir>/handlers`,
/// cache record at `<dir>/cache/routes.json`.
pub fn test_config(dir: &Path) -> RouterConfig {
    let mut config = RouterConfig::default();
    config.handlers.root = dir.join("handlers");
    config.cache.path = dir.join("cache/routes.json");
    config
}

/// Build the route table, start a router on an ephemeral port, and return
/// its address.
#[allow(dead_code)]
pub async fn start_router(config: RouterConfig, predicate: Option<AuthPredicate>) -> SocketAddr {
    let cache = RouteCache::new(&config.cache.path);
    let (table, _) =
        RouteTable::load_or_scan(&cache, &config.handlers.root, &config.handlers.convention)
            .expect("route table construction failed");

    let mut dispatcher = Dispatcher::new(
        Arc::new(table),
        config.api.prefix.clone(),
        Arc::new(EchoRunner),
    );
    if let Some(predicate) = predicate {
        dispatcher = dispatcher.with_predicate(predicate);
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, Arc::new(dispatcher));
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    // The listener is already bound; a short pause lets serve() pick it up.
    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}
