//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all dispatch handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Serve connections with graceful shutdown
//!
//! # Design Decisions
//! - Every path funnels into one handler; route resolution is the
//!   dispatcher's job, not Axum's
//! - The dispatcher is shared immutably via Arc; no per-request locking

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RouterConfig;
use crate::dispatch::Dispatcher;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// HTTP server for the convention router.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server around a fully constructed dispatcher.
    pub fn new(config: RouterConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let state = AppState { dispatcher };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Catch-all handler: hands every request to the dispatcher.
async fn dispatch_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> impl IntoResponse {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    state.dispatcher.dispatch(&method, &path).await
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::EchoRunner;
    use crate::routing::{RouteDescriptor, RouteTable};
    use axum::http::StatusCode;
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let table = RouteTable::new(vec![RouteDescriptor {
            template: "/user/:id".to_string(),
            methods: None,
            auth_rule: None,
            handler_ref: PathBuf::from("handlers/user.js"),
        }]);
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::new(table),
            "/api",
            Arc::new(EchoRunner),
        ));
        HttpServer::build_router(&RouterConfig::default(), AppState { dispatcher })
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_matched_path_reaches_runner() {
        let response: Response = test_router().oneshot(request("/api/user/7")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unmatched_path_is_404() {
        let response: Response = test_router().oneshot(request("/api/nothing/here/at/all")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
