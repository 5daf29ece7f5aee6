//! PostgreSQL implementation of the document history repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{DocumentRecord, NewDocumentRecord};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;

pub struct PgDocumentRepository {
    pool: Arc<PgPool>,
}

impl PgDocumentRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn insert(&self, record: NewDocumentRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO document_history
                (user_id, action, document_type, prompt, html_before, html_after,
                 input_tokens, output_tokens)
            VALUES ($1::uuid, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&record.user_id)
        .bind(record.action.as_str())
        .bind(&record.document_type)
        .bind(&record.prompt)
        .bind(&record.html_before)
        .bind(&record.html_after)
        .bind(record.input_tokens)
        .bind(record.output_tokens)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count_for_user_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM document_history WHERE user_id = $1::uuid AND created_at >= $2",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM document_history WHERE created_at >= $1")
                .bind(since)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn list_since(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<DocumentRecord>, AppError> {
        let rows = sqlx::query_as::<_, DocumentRecord>(
            r#"
            SELECT id::text AS id, user_id::text AS user_id, action, document_type, prompt,
                   html_before, html_after, input_tokens, output_tokens, created_at
            FROM document_history
            WHERE created_at >= $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(since)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<DocumentRecord>, AppError> {
        let rows = sqlx::query_as::<_, DocumentRecord>(
            r#"
            SELECT id::text AS id, user_id::text AS user_id, action, document_type, prompt,
                   html_before, html_after, input_tokens, output_tokens, created_at
            FROM document_history
            WHERE user_id = $1::uuid
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }
}
