use std::net::IpAddr;

use crate::error::AppError;
use crate::models::Submission;
use crate::state::SharedState;

use super::fields;
use super::parser;

/// Accept one contact submission: quota, parse, validate, store, notify.
///
/// The store insert happens before the notification and is kept even when
/// the notification fails.
pub async fn run(
    state: &SharedState,
    client: IpAddr,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Submission, AppError> {
    if let Err(retry_after) = state.contact_limiter.check(client) {
        tracing::warn!("Contact quota exceeded for {client}");
        return Err(AppError::RateLimited { retry_after });
    }

    let raw = parser::parse_body(content_type, body).map_err(AppError::BadRequest)?;
    let form = fields::validate(&raw).map_err(AppError::BadRequest)?;

    let submission = state.store.insert(form);
    tracing::info!("Stored contact submission {} from {client}", submission.id);

    match &state.notifier {
        Some(notifier) => {
            if let Err(e) = notifier.notify(&submission).await {
                tracing::error!("Failed to notify for submission {}: {e}", submission.id);
                return Err(AppError::Notification(e));
            }
        }
        None => {
            tracing::warn!(
                "Email is not configured; submission {} was stored without a notification",
                submission.id
            );
        }
    }

    Ok(submission)
}
