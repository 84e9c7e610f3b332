pub mod auth;
pub mod contact;
pub mod health;
pub mod messages;

use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Intake
        .route("/api/contact", post(contact::submit))
        // Operator
        .route("/api/auth", post(auth::login))
        .route(
            "/api/messages",
            get(messages::list).delete(messages::clear),
        )
        .route("/api/messages/{id}", delete(messages::delete))
        // Health
        .route("/api/health", get(health::health))
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}
