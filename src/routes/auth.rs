use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{json, Value};

use crate::auth::extractor::NOT_CONFIGURED;
use crate::auth::secret;
use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::metadata::ClientIp;
use crate::submission::parser::{self, RawBody};

/// Check a candidate operator secret. On success the client keeps the secret
/// and sends it as a bearer token to the moderation endpoints.
pub async fn login(
    State(state): State<SharedState>,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
    RawBody(body): RawBody,
) -> Result<Json<Value>, AppError> {
    if let Err(retry_after) = state.auth_limiter.check(ip) {
        tracing::warn!("Auth quota exceeded for {ip}");
        return Err(AppError::RateLimited { retry_after });
    }

    let configured = state
        .config
        .admin_password
        .as_deref()
        .ok_or_else(|| AppError::Misconfigured(NOT_CONFIGURED.to_string()))?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let raw = parser::parse_body(content_type, &body).map_err(AppError::BadRequest)?;
    let candidate = raw.get("password").and_then(Value::as_str).unwrap_or_default();

    if !secret::matches(candidate, configured) {
        tracing::warn!("Failed operator login from {ip}");
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    tracing::info!("Operator authenticated from {ip}");
    Ok(Json(json!({ "success": true })))
}
