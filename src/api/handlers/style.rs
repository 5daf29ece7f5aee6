//! Handler for style fingerprint extraction.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::style::{ExtractStyleRequest, ExtractStyleResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Extracts and stores the design fingerprint of a document.
///
/// # Endpoint
///
/// `POST /api/extract-style`
///
/// # Errors
///
/// - 400 when `userId`, `html` or `documentType` is missing
/// - 500 "Style extraction failed" for any provider, parse or storage failure
pub async fn extract_style_handler(
    State(state): State<AppState>,
    Json(payload): Json<ExtractStyleRequest>,
) -> Result<Json<ExtractStyleResponse>, AppError> {
    payload.validate()?;

    let fingerprint = state
        .style_service
        .extract(
            &payload.user_id.unwrap_or_default(),
            &payload.document_type.unwrap_or_default(),
            &payload.html.unwrap_or_default(),
        )
        .await?;

    Ok(Json(ExtractStyleResponse {
        success: true,
        fingerprint,
    }))
}
