use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::metadata::ClientIp;
use crate::submission::parser::RawBody;
use crate::submission::pipeline;

pub async fn submit(
    State(state): State<SharedState>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Result<Json<Value>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    pipeline::run(&state, ip, content_type, &body).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Message sent successfully!",
    })))
}
