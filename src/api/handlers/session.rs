//! Handlers for login session logging and activity tracking.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::session::{
    AuthCallbackRequest, LogActivityRequest, LogActivityResponse, SuccessResponse,
};
use crate::application::services::session_service::LoginEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip_from_headers;

/// Records a sign-in reported by the browser after authentication.
///
/// # Endpoint
///
/// `POST /api/auth-callback`
///
/// Session logging, the welcome email and the multi-IP check never fail the request.
///
/// # Errors
///
/// Returns 400 when `userId` or `email` is missing.
pub async fn auth_callback_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AuthCallbackRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    payload.validate()?;

    state
        .session_service
        .record_login(LoginEvent {
            user_id: payload.user_id.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            user_agent: payload.user_agent,
            ip_address: client_ip_from_headers(&headers),
            is_new_user: payload.is_new_user,
        })
        .await;

    Ok(Json(SuccessResponse { success: true }))
}

/// Logs today as an active day of a free-plan user.
///
/// # Endpoint
///
/// `POST /api/log-activity`
///
/// # Response
///
/// ```json
/// { "ok": true, "activeDays": 2, "trialEligible": true }
/// ```
///
/// # Errors
///
/// - 400 when `userId` is missing
/// - 500 when the profile cannot be read or updated
pub async fn log_activity_handler(
    State(state): State<AppState>,
    Json(payload): Json<LogActivityRequest>,
) -> Result<Json<LogActivityResponse>, AppError> {
    payload.validate()?;

    let outcome = state
        .session_service
        .log_activity(&payload.user_id.unwrap_or_default())
        .await?;

    Ok(Json(outcome.into()))
}
