//! PostgreSQL implementation of the profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Plan, Profile, ProfileSummary};
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

/// PostgreSQL repository for `profiles`.
///
/// Nullable legacy columns are coalesced so a [`Profile`] is always complete.
pub struct PgProfileRepository {
    pool: Arc<PgPool>,
}

impl PgProfileRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id::text AS id, email, display_name,
                   COALESCE(plan, 'free') AS plan, role, stripe_customer_id,
                   COALESCE(credits_used, 0) AS credits_used, credits_reset_at,
                   COALESCE(active_days_log, '{}') AS active_days_log,
                   COALESCE(active_days_count, 0) AS active_days_count,
                   COALESCE(trial_eligible, TRUE) AS trial_eligible
            FROM profiles
            WHERE id = $1::uuid
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(profile)
    }

    async fn set_credits_used(
        &self,
        user_id: &str,
        credits_used: i32,
        reset_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET credits_used = $2, credits_reset_at = $3, updated_at = NOW()
            WHERE id = $1::uuid
            "#,
        )
        .bind(user_id)
        .bind(credits_used)
        .bind(reset_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn update_active_days(
        &self,
        user_id: &str,
        days: Vec<String>,
        active_days_count: i32,
        trial_eligible: bool,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET active_days_log = $2, active_days_count = $3, trial_eligible = $4
            WHERE id = $1::uuid
            "#,
        )
        .bind(user_id)
        .bind(days)
        .bind(active_days_count)
        .bind(trial_eligible)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn set_customer_id(&self, user_id: &str, customer_id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE profiles SET stripe_customer_id = $2 WHERE id = $1::uuid")
            .bind(user_id)
            .bind(customer_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn set_plan(&self, user_id: &str, plan: Plan) -> Result<(), AppError> {
        sqlx::query("UPDATE profiles SET plan = $2, updated_at = NOW() WHERE id = $1::uuid")
            .bind(user_id)
            .bind(plan.as_str())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn set_plan_and_customer(
        &self,
        user_id: &str,
        plan: Plan,
        customer_id: Option<String>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET plan = $2, stripe_customer_id = COALESCE($3, stripe_customer_id), updated_at = NOW()
            WHERE id = $1::uuid
            "#,
        )
        .bind(user_id)
        .bind(plan.as_str())
        .bind(customer_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn activate_subscription(
        &self,
        user_id: &str,
        plan: Plan,
        customer_id: Option<String>,
    ) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET plan = $2,
                stripe_customer_id = COALESCE($3, stripe_customer_id),
                credits_used = 0,
                credits_reset_at = NOW(),
                updated_at = NOW()
            WHERE id = $1::uuid
            RETURNING id::text AS id, email, display_name, plan, role, stripe_customer_id,
                      credits_used, credits_reset_at,
                      COALESCE(active_days_log, '{}') AS active_days_log,
                      COALESCE(active_days_count, 0) AS active_days_count,
                      COALESCE(trial_eligible, TRUE) AS trial_eligible
            "#,
        )
        .bind(user_id)
        .bind(plan.as_str())
        .bind(customer_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(profile)
    }

    async fn downgrade_customer(&self, customer_id: &str) -> Result<Vec<Profile>, AppError> {
        let profiles = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET plan = 'free', updated_at = NOW()
            WHERE stripe_customer_id = $1
            RETURNING id::text AS id, email, display_name, plan, role, stripe_customer_id,
                      COALESCE(credits_used, 0) AS credits_used, credits_reset_at,
                      COALESCE(active_days_log, '{}') AS active_days_log,
                      COALESCE(active_days_count, 0) AS active_days_count,
                      COALESCE(trial_eligible, TRUE) AS trial_eligible
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(profiles)
    }

    async fn list_summaries(&self) -> Result<Vec<ProfileSummary>, AppError> {
        let profiles = sqlx::query_as::<_, ProfileSummary>(
            r#"
            SELECT id::text AS id, email, display_name, COALESCE(plan, 'free') AS plan,
                   role, stripe_customer_id, created_at
            FROM profiles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(profiles)
    }
}
