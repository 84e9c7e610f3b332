use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::extractor::Operator;
use crate::error::AppError;
use crate::state::SharedState;

pub async fn list(_: Operator, State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "messages": state.store.list() }))
}

pub async fn delete(
    _: Operator,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    // An id that isn't a valid token can't be stored, so it's just not found.
    let removed = Uuid::parse_str(&id)
        .ok()
        .and_then(|id| state.store.remove(id));

    match removed {
        Some(submission) => {
            tracing::info!("Deleted submission {}", submission.id);
            Ok(Json(json!({ "success": true })))
        }
        None => Err(AppError::NotFound("Message not found".to_string())),
    }
}

pub async fn clear(_: Operator, State(state): State<SharedState>) -> Json<Value> {
    let removed = state.store.clear();
    tracing::info!("Cleared {removed} submissions");

    Json(json!({
        "success": true,
        "message": "All messages cleared",
    }))
}
