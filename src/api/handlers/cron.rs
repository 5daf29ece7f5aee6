//! Handlers for the scheduled training jobs.

use axum::{Json, extract::State};

use crate::api::dto::training::{NightlyResponse, WeeklyReportResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Scores the last day of generated documents and stores a training run.
///
/// # Endpoint
///
/// `GET|POST /api/cron/nightly-training`, requires `Authorization: Bearer <CRON_SECRET>`.
///
/// # Errors
///
/// Returns 500 when the model is not configured or the documents cannot be read.
pub async fn nightly_training_handler(
    State(state): State<AppState>,
) -> Result<Json<NightlyResponse>, AppError> {
    let outcome = state.training_service.run_nightly().await?;
    Ok(Json(outcome.into()))
}

/// Aggregates the last seven days of training runs.
///
/// # Endpoint
///
/// `GET|POST /api/cron/weekly-report`, requires `Authorization: Bearer <CRON_SECRET>`.
pub async fn weekly_report_handler(
    State(state): State<AppState>,
) -> Result<Json<WeeklyReportResponse>, AppError> {
    let report = state.training_service.weekly_report().await?;
    Ok(Json(WeeklyReportResponse {
        success: true,
        report,
    }))
}
