//! Handler for transactional email dispatch.

use axum::{Json, extract::State};
use serde_json::json;
use validator::Validate;

use crate::api::dto::email::{SendEmailRequest, SendEmailResponse};
use crate::domain::entities::EmailType;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::email_address::normalize_email;

/// Sends one transactional email unless its cooldown is still running.
///
/// # Endpoint
///
/// `POST /api/send-email`
///
/// # Response
///
/// ```json
/// { "success": true, "id": "re_123" }
/// ```
///
/// or, inside the cooldown window:
///
/// ```json
/// { "skipped": true, "reason": "cooldown" }
/// ```
///
/// # Errors
///
/// - 400 when a field is missing, the address is invalid or the type is unknown
/// - 500 when the mail provider rejects the message
pub async fn send_email_handler(
    State(state): State<AppState>,
    Json(payload): Json<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, AppError> {
    payload.validate()?;

    let email = payload
        .email
        .as_deref()
        .and_then(normalize_email)
        .ok_or_else(|| AppError::bad_request("Invalid email", json!({ "field": "email" })))?;

    let type_name = payload.email_type.unwrap_or_default();
    let email_type: EmailType = type_name.parse().map_err(|_| {
        AppError::bad_request("Unknown email type", json!({ "type": type_name }))
    })?;

    let outcome = state
        .email_service
        .send(
            &payload.user_id.unwrap_or_default(),
            &email,
            email_type,
            payload.data,
        )
        .await?;

    Ok(Json(outcome.into()))
}
