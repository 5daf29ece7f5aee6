//! Handlers for the template catalog.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::catalog::{GenerateTemplatesResponse, TemplatesListQuery, TemplatesListResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Rebuilds the whole template catalog.
///
/// # Endpoint
///
/// `POST /api/generate-templates`
///
/// Guarded by the admin key or an admin bearer token. Failed insert batches are
/// reported in `errors` and do not fail the request.
///
/// # Errors
///
/// Returns 500 when the existing rows cannot be cleared.
pub async fn generate_templates_handler(
    State(state): State<AppState>,
) -> Result<Json<GenerateTemplatesResponse>, AppError> {
    let report = state.catalog_service.regenerate().await?;
    Ok(Json(report.into()))
}

/// Lists active templates with filters and pagination.
///
/// # Endpoint
///
/// `GET /api/templates-list?page=1&limit=30&search=&industry=&document_type=&style_id=&tier=`
///
/// Filters equal to `all` or empty are ignored. `limit` is clamped to 1..=100.
///
/// # Errors
///
/// Returns 500 when the query fails.
pub async fn templates_list_handler(
    State(state): State<AppState>,
    Query(query): Query<TemplatesListQuery>,
) -> Result<Json<TemplatesListResponse>, AppError> {
    let listing = state.catalog_service.list(query.into()).await?;
    Ok(Json(listing.into()))
}
