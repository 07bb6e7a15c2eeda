//! Terminal error responses.
//!
//! The two dispatcher fallbacks share one JSON shape: `{"error": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// 404 with the structured not-found body.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Route not found"}))).into_response()
}

/// 401 with the structured unauthorized body.
pub fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"}))).into_response()
}
