//! Repository trait for evaluation results and golden samples.

use crate::domain::entities::{
    GoldenSample, NewEvaluation, NewGoldenSample, NewTrainingRun, TrainingRun,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Access to `training_evaluations`, `golden_samples` and `training_runs`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTrainingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainingRepository: Send + Sync {
    /// Highest-scoring golden sample for a document type.
    async fn best_golden_sample(
        &self,
        document_type: &str,
    ) -> Result<Option<GoldenSample>, AppError>;

    async fn insert_evaluation(&self, evaluation: NewEvaluation) -> Result<(), AppError>;

    async fn insert_golden_sample(&self, sample: NewGoldenSample) -> Result<(), AppError>;

    async fn insert_run(&self, run: NewTrainingRun) -> Result<(), AppError>;

    async fn runs_since(&self, since: DateTime<Utc>) -> Result<Vec<TrainingRun>, AppError>;
}
