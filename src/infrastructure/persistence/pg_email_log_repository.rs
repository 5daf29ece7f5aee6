//! PostgreSQL implementation of the email log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{EmailType, NewEmailLog};
use crate::domain::repositories::EmailLogRepository;
use crate::error::AppError;

pub struct PgEmailLogRepository {
    pool: Arc<PgPool>,
}

impl PgEmailLogRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailLogRepository for PgEmailLogRepository {
    async fn last_sent_at(
        &self,
        user_id: &str,
        email_type: EmailType,
    ) -> Result<Option<DateTime<Utc>>, AppError> {
        let sent_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT MAX(sent_at)
            FROM email_log
            WHERE user_id = $1::uuid AND email_type = $2
            "#,
        )
        .bind(user_id)
        .bind(email_type.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(sent_at)
    }

    async fn record(&self, entry: NewEmailLog) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO email_log (user_id, email_type, resend_id) VALUES ($1::uuid, $2, $3)",
        )
        .bind(&entry.user_id)
        .bind(entry.email_type.as_str())
        .bind(&entry.resend_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
