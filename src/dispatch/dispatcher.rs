//! Request dispatch pipeline.
//!
//! # Data Flow
//! ```text
//! (method, raw path)
//!     → Matching   (matcher over the full table, first match wins)
//!     → AuthChecking (auth gate on the matched descriptor's rule)
//!     → Invoking   (handler runner, exactly once)
//!   or → 401 {"error":"Unauthorized"}   (deny is final; later descriptors
//!                                        are never consulted)
//!   or → 404 {"error":"Route not found"}
//! ```
//!
//! # Design Decisions
//! - First-match commitment is absolute: a denied request is not re-matched
//!   against later descriptors
//! - The dispatcher does not inspect or transform the runner's response
//! - No-match and deny are ordinary outcomes, not errors

use axum::response::Response;
use std::sync::Arc;
use std::time::Instant;

use crate::dispatch::auth::{self, AuthDecision, AuthPredicate};
use crate::dispatch::runner::{HandlerCall, HandlerRunner};
use crate::http::response;
use crate::observability::metrics;
use crate::routing::{match_route, RouteTable};

/// Owns the route table for the process lifetime and drives
/// match → auth → invoke for each request.
pub struct Dispatcher {
    table: Arc<RouteTable>,
    api_prefix: String,
    predicate: Option<AuthPredicate>,
    runner: Arc<dyn HandlerRunner>,
}

impl Dispatcher {
    pub fn new(
        table: Arc<RouteTable>,
        api_prefix: impl Into<String>,
        runner: Arc<dyn HandlerRunner>,
    ) -> Self {
        Self {
            table,
            api_prefix: api_prefix.into(),
            predicate: None,
            runner,
        }
    }

    /// Register the auth predicate. Called at most once, at startup.
    pub fn with_predicate(mut self, predicate: AuthPredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Run one request through the pipeline.
    pub async fn dispatch(&self, method: &str, raw_path: &str) -> Response {
        let start = Instant::now();

        let matched = match match_route(&self.table, method, raw_path, &self.api_prefix) {
            Some(m) => m,
            None => {
                tracing::debug!(method = %method, path = %raw_path, "No route matched");
                metrics::record_dispatch(method, 404, "none", start);
                return response::not_found();
            }
        };

        let template = matched.descriptor.template.clone();
        match auth::check(matched.descriptor.auth_rule.as_deref(), self.predicate.as_ref()) {
            AuthDecision::Deny => {
                tracing::warn!(
                    method = %method,
                    path = %raw_path,
                    route = %template,
                    "Request denied by auth gate"
                );
                metrics::record_dispatch(method, 401, &template, start);
                response::unauthorized()
            }
            AuthDecision::Allow => {
                let call = HandlerCall {
                    handler_ref: matched.descriptor.handler_ref.clone(),
                    method: method.to_string(),
                    path: raw_path.to_string(),
                    params: matched.params,
                };
                tracing::debug!(
                    method = %method,
                    path = %raw_path,
                    route = %template,
                    handler = %call.handler_ref.display(),
                    "Invoking handler"
                );
                let response = self.runner.invoke(call).await;
                metrics::record_dispatch(method, response.status().as_u16(), &template, start);
                response
            }
        }
    }
}
