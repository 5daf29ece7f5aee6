//! Handlers for checkout, billing portal and session verification.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::billing::{
    CreateCheckoutRequest, CreatePortalRequest, UrlResponse, VerifySessionRequest,
};
use crate::api::dto::non_blank;
use crate::application::services::billing_service::{CheckoutLink, PlanStatus};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::origin_or;

/// Starts a subscription checkout.
///
/// # Endpoint
///
/// `POST /api/create-checkout-session`
///
/// Return URLs are built from the `Origin` header, or the configured app URL.
///
/// # Response
///
/// ```json
/// { "sessionId": "cs_test_...", "url": "https://checkout.stripe.com/..." }
/// ```
///
/// # Errors
///
/// - 400 when `plan` or `userId` is missing, or the plan has no price
/// - 500 when the payments provider fails
pub async fn create_checkout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateCheckoutRequest>,
) -> Result<Json<CheckoutLink>, AppError> {
    payload.validate()?;

    let origin = origin_or(&headers, &state.app_url);
    let link = state
        .billing_service
        .create_checkout(
            &payload.plan.unwrap_or_default(),
            &payload.user_id.unwrap_or_default(),
            non_blank(payload.user_email),
            &origin,
        )
        .await?;

    Ok(Json(link))
}

/// Opens the self-service billing portal.
///
/// # Endpoint
///
/// `POST /api/create-portal-session`
///
/// # Errors
///
/// - 400 when no customer can be found
/// - 404 when `userId` has no profile
/// - 500 when the payments provider fails
pub async fn create_portal_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePortalRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    let origin = origin_or(&headers, &state.app_url);
    let user_id = non_blank(payload.user_id);

    let url = state
        .billing_service
        .create_portal(user_id.as_deref(), payload.customer_id, &origin)
        .await?;

    Ok(Json(UrlResponse { url }))
}

/// Reconciles a user's plan with the payments provider.
///
/// # Endpoint
///
/// `POST /api/verify-session`
///
/// # Response
///
/// ```json
/// { "plan": "pro", "status": "trialing", "trialEnd": "2026-04-01T00:00:00Z" }
/// ```
///
/// # Errors
///
/// - 400 when `userId` is missing
/// - 500 when the payments provider or the database fails
pub async fn verify_session_handler(
    State(state): State<AppState>,
    Json(payload): Json<VerifySessionRequest>,
) -> Result<Json<PlanStatus>, AppError> {
    payload.validate()?;

    let status = state
        .billing_service
        .verify(
            &payload.user_id.unwrap_or_default(),
            payload.session_id.as_deref(),
        )
        .await?;

    Ok(Json(status))
}
