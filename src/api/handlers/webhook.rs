//! Handler for payment provider webhooks.

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};

use crate::api::dto::billing::WebhookAck;
use crate::error::AppError;
use crate::state::AppState;

/// Receives a signed payment event.
///
/// # Endpoint
///
/// `POST /api/webhook`
///
/// The raw body is needed for signature verification, so it is taken as bytes.
///
/// # Errors
///
/// - 400 when the `Stripe-Signature` header is missing or does not verify
/// - 500 when the plan change cannot be stored
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, AppError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok());

    state.webhook_service.handle(&body, signature).await?;

    Ok(Json(WebhookAck { received: true }))
}
