//! PostgreSQL implementation of the document style repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::StyleFingerprint;
use crate::domain::repositories::StyleRepository;
use crate::error::AppError;

/// Fingerprints are stored as JSONB, one row per (user, document type).
pub struct PgStyleRepository {
    pool: Arc<PgPool>,
}

impl PgStyleRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StyleRepository for PgStyleRepository {
    async fn find(
        &self,
        user_id: &str,
        document_type: &str,
    ) -> Result<Option<StyleFingerprint>, AppError> {
        let row: Option<Json<StyleFingerprint>> = sqlx::query_scalar(
            r#"
            SELECT style_fingerprint
            FROM document_styles
            WHERE user_id = $1::uuid AND document_type = $2
            "#,
        )
        .bind(user_id)
        .bind(document_type)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|Json(fingerprint)| fingerprint))
    }

    async fn upsert(
        &self,
        user_id: &str,
        document_type: &str,
        fingerprint: StyleFingerprint,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO document_styles (user_id, document_type, style_fingerprint, updated_at)
            VALUES ($1::uuid, $2, $3, NOW())
            ON CONFLICT (user_id, document_type)
            DO UPDATE SET style_fingerprint = EXCLUDED.style_fingerprint, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(document_type)
        .bind(Json(fingerprint))
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
