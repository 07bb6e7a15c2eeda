//! Handler invocation boundary.
//!
//! The execution environment for handler files lives outside this crate;
//! the router only promises to invoke it exactly once per matched and
//! authorized request, with the bound path parameters.

use async_trait::async_trait;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::path::PathBuf;

use crate::routing::PathParams;

/// Everything a handler needs to run: which file, and for which request.
#[derive(Debug, Clone)]
pub struct HandlerCall {
    /// Handler file path as recorded in the route table.
    pub handler_ref: PathBuf,

    /// Uppercase HTTP method of the incoming request.
    pub method: String,

    /// Raw request path, before prefix stripping.
    pub path: String,

    /// Parameter bindings from the matched template.
    pub params: PathParams,
}

/// Executes matched handlers. Implemented by the embedding application.
#[async_trait]
pub trait HandlerRunner: Send + Sync {
    /// Run the handler and produce the response. The dispatcher returns the
    /// response untouched.
    async fn invoke(&self, call: HandlerCall) -> Response;
}

/// Development runner: echoes the invocation back as JSON.
///
/// Stands in for a real execution environment so the routing pipeline can
/// be exercised end to end.
pub struct EchoRunner;

#[async_trait]
impl HandlerRunner for EchoRunner {
    async fn invoke(&self, call: HandlerCall) -> Response {
        Json(json!({
            "handler": call.handler_ref.display().to_string(),
            "method": call.method,
            "path": call.path,
            "params": call.params,
        }))
        .into_response()
    }
}
