//! Handler for AI document generation.

use axum::{Json, extract::State};
use serde_json::json;
use validator::Validate;

use crate::api::dto::generate::{GenerateRequest, GenerateResponse};
use crate::api::dto::non_blank;
use crate::application::services::generation_service::GenerationRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Generates a new document or edits an existing one.
///
/// # Endpoint
///
/// `POST /api/ai-generate`
///
/// # Request Body
///
/// ```json
/// {
///   "prompt": "Invoice for 3 hours of consulting",
///   "mode": "generate",
///   "docType": "invoice",
///   "userId": "6f1c2a8e-0d4b-4a57-9b0e-2f3c4d5e6f70",
///   "currentHtml": null,
///   "email": "owner@example.com"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "html": "<div>...</div>",
///   "mode": "generate",
///   "usage": { "input_tokens": 1200, "output_tokens": 900 },
///   "credits": { "used": 3, "limit": 5, "remaining": 2 },
///   "plan": "free"
/// }
/// ```
///
/// # Errors
///
/// - 400 for a missing prompt or user id, or an edit without `currentHtml`
/// - 402 when the monthly credits are used up
/// - 404 when the user has no profile
/// - 429 when the per-minute limit is reached
/// - 500 when the AI provider fails
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    payload.validate()?;

    let mode = payload.generation_mode();
    let prompt = non_blank(payload.prompt)
        .ok_or_else(|| AppError::bad_request("Prompt is required", json!({ "field": "prompt" })))?;

    let outcome = state
        .generation_service
        .generate(GenerationRequest {
            prompt,
            mode,
            doc_type: non_blank(payload.doc_type),
            user_id: payload.user_id.unwrap_or_default(),
            current_html: payload.current_html,
            email: non_blank(payload.email),
        })
        .await?;

    Ok(Json(outcome.into()))
}
