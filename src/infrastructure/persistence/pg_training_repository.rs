//! PostgreSQL implementation of the training repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{
    GoldenSample, NewEvaluation, NewGoldenSample, NewTrainingRun, TrainingRun,
};
use crate::domain::repositories::TrainingRepository;
use crate::error::AppError;

pub struct PgTrainingRepository {
    pool: Arc<PgPool>,
}

impl PgTrainingRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainingRepository for PgTrainingRepository {
    async fn best_golden_sample(
        &self,
        document_type: &str,
    ) -> Result<Option<GoldenSample>, AppError> {
        let sample = sqlx::query_as::<_, GoldenSample>(
            r#"
            SELECT document_type, prompt, html, quality_score
            FROM golden_samples
            WHERE document_type = $1
            ORDER BY quality_score DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(document_type)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(sample)
    }

    async fn insert_evaluation(&self, evaluation: NewEvaluation) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO training_evaluations (document_history_id, quality_score, issues, suggestions)
            VALUES ($1::uuid, $2, $3, $4)
            "#,
        )
        .bind(&evaluation.document_history_id)
        .bind(evaluation.quality_score)
        .bind(Json(&evaluation.issues))
        .bind(&evaluation.suggestions)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn insert_golden_sample(&self, sample: NewGoldenSample) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO golden_samples (document_type, prompt, html, quality_score, tags)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&sample.document_type)
        .bind(&sample.prompt)
        .bind(&sample.html)
        .bind(sample.quality_score)
        .bind(&sample.tags)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn insert_run(&self, run: NewTrainingRun) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO training_runs
                (run_date, documents_processed, avg_quality_score, issues_found,
                 golden_samples_created, api_cost, duration_seconds)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(run.run_date)
        .bind(run.documents_processed)
        .bind(run.avg_quality_score)
        .bind(Json(&run.issues_found))
        .bind(run.golden_samples_created)
        .bind(run.api_cost)
        .bind(run.duration_seconds)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn runs_since(&self, since: DateTime<Utc>) -> Result<Vec<TrainingRun>, AppError> {
        let runs = sqlx::query_as::<_, TrainingRun>(
            r#"
            SELECT run_date, documents_processed, avg_quality_score, issues_found,
                   golden_samples_created, api_cost, duration_seconds, created_at
            FROM training_runs
            WHERE created_at >= $1
            ORDER BY created_at
            "#,
        )
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(runs)
    }
}
