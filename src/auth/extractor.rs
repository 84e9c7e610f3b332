use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use crate::auth::secret;
use crate::error::AppError;
use crate::state::SharedState;

pub const NOT_CONFIGURED: &str = "Admin password not configured";

/// Proof that the request carried the operator secret as a bearer token.
///
/// Extraction fails before the handler body runs, so rejected calls never
/// touch the message store.
#[derive(Debug, Clone, Copy)]
pub struct Operator;

impl FromRequestParts<SharedState> for Operator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let configured = state
            .config
            .admin_password
            .as_deref()
            .ok_or_else(|| AppError::Misconfigured(NOT_CONFIGURED.to_string()))?;

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))?;

        if secret::matches(bearer.token(), configured) {
            Ok(Operator)
        } else {
            Err(AppError::Unauthorized("Unauthorized".to_string()))
        }
    }
}
