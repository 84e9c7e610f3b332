use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Last-resort handler for a panicking request: log it and answer with a
/// generic JSON 500 instead of dropping the connection.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        Some(s.clone())
    } else {
        err.downcast_ref::<&str>().map(|s| s.to_string())
    };

    tracing::error!(
        "Handler panicked: {}",
        detail.as_deref().unwrap_or("unknown panic payload")
    );

    let body = match detail {
        Some(message) => json!({ "error": "Internal server error", "message": message }),
        None => json!({ "error": "Internal server error" }),
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
