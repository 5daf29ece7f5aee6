//! PostgreSQL implementations for login sessions and activity flags.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    ActivityFlag, NewActivityFlag, NewUserSession, UserActivitySummary, UserSession,
};
use crate::domain::repositories::{ActivityFlagRepository, SessionRepository};
use crate::error::AppError;

const FLAG_COLUMNS: &str = "id::text AS id, user_id::text AS user_id, email, flag_type, \
     severity, details, resolved, resolved_at, resolved_by, created_at";

/// PostgreSQL repository for `user_sessions` and the analytics views over it.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn insert(&self, session: NewUserSession) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_sessions (user_id, email, ip_address, user_agent, logged_in_at, last_active_at, is_active)
            VALUES ($1::uuid, $2, $3, $4, NOW(), NOW(), TRUE)
            "#,
        )
        .bind(&session.user_id)
        .bind(&session.email)
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn distinct_ips_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<String>, AppError> {
        let ips: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT ip_address
            FROM user_sessions
            WHERE user_id = $1::uuid AND logged_in_at >= $2 AND ip_address IS NOT NULL
            ORDER BY ip_address
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ips)
    }

    async fn count_active_since(&self, since: DateTime<Utc>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT user_id) FROM user_sessions WHERE last_active_at >= $1",
        )
        .bind(since)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn list_for_user(&self, user_id: &str, limit: i64) -> Result<Vec<UserSession>, AppError> {
        let sessions = sqlx::query_as::<_, UserSession>(
            r#"
            SELECT id::text AS id, user_id::text AS user_id, email, ip_address, user_agent,
                   logged_in_at, last_active_at, is_active
            FROM user_sessions
            WHERE user_id = $1::uuid
            ORDER BY logged_in_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(sessions)
    }

    async fn activity_summary(&self) -> Result<Vec<UserActivitySummary>, AppError> {
        let rows = sqlx::query_as::<_, UserActivitySummary>(
            r#"
            SELECT p.id::text AS user_id,
                   p.email,
                   p.plan,
                   (SELECT COUNT(*) FROM document_history d WHERE d.user_id = p.id) AS documents,
                   (SELECT COUNT(*) FROM user_sessions s WHERE s.user_id = p.id) AS sessions,
                   (SELECT COUNT(*) FROM activity_flags f
                     WHERE f.user_id = p.id AND f.resolved = FALSE) AS open_flags,
                   (SELECT MAX(s.logged_in_at) FROM user_sessions s WHERE s.user_id = p.id)
                       AS last_active_at
            FROM profiles p
            ORDER BY last_active_at DESC NULLS LAST
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn url_click_summary(&self, limit: i64) -> Result<Vec<Value>, AppError> {
        let rows: Vec<Value> =
            sqlx::query_scalar("SELECT row_to_json(s) FROM url_clicks_summary s LIMIT $1")
                .bind(limit)
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows)
    }
}

/// PostgreSQL repository for `activity_flags`.
pub struct PgActivityFlagRepository {
    pool: Arc<PgPool>,
}

impl PgActivityFlagRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityFlagRepository for PgActivityFlagRepository {
    async fn insert(&self, flag: NewActivityFlag) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO activity_flags (user_id, email, flag_type, severity, details)
            VALUES ($1::uuid, $2, $3, $4, $5)
            "#,
        )
        .bind(&flag.user_id)
        .bind(&flag.email)
        .bind(&flag.flag_type)
        .bind(&flag.severity)
        .bind(&flag.details)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count_unresolved(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM activity_flags WHERE resolved = FALSE")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn list_unresolved(&self) -> Result<Vec<ActivityFlag>, AppError> {
        let sql = format!(
            "SELECT {FLAG_COLUMNS} FROM activity_flags WHERE resolved = FALSE ORDER BY created_at DESC"
        );
        let flags = sqlx::query_as::<_, ActivityFlag>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(flags)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ActivityFlag>, AppError> {
        let sql = format!(
            "SELECT {FLAG_COLUMNS} FROM activity_flags WHERE user_id = $1::uuid ORDER BY created_at DESC"
        );
        let flags = sqlx::query_as::<_, ActivityFlag>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(flags)
    }

    async fn resolve(
        &self,
        flag_id: &str,
        resolved_by: &str,
    ) -> Result<Option<ActivityFlag>, AppError> {
        let sql = format!(
            r#"
            UPDATE activity_flags
            SET resolved = TRUE, resolved_at = NOW(), resolved_by = $2
            WHERE id = $1::uuid
            RETURNING {FLAG_COLUMNS}
            "#
        );
        let flag = sqlx::query_as::<_, ActivityFlag>(&sql)
            .bind(flag_id)
            .bind(resolved_by)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(flag)
    }
}
