//! Repository trait for user profiles.

use crate::domain::entities::{Plan, Profile, ProfileSummary};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Access to `profiles`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProfileRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<Profile>, AppError>;

    /// Stores the credit counter and the month stamp it belongs to.
    async fn set_credits_used(
        &self,
        user_id: &str,
        credits_used: i32,
        reset_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    async fn update_active_days(
        &self,
        user_id: &str,
        days: Vec<String>,
        active_days_count: i32,
        trial_eligible: bool,
    ) -> Result<(), AppError>;

    async fn set_customer_id(&self, user_id: &str, customer_id: &str) -> Result<(), AppError>;

    async fn set_plan(&self, user_id: &str, plan: Plan) -> Result<(), AppError>;

    /// Sets plan and payment customer without touching credits.
    async fn set_plan_and_customer(
        &self,
        user_id: &str,
        plan: Plan,
        customer_id: Option<String>,
    ) -> Result<(), AppError>;

    /// Records a paid subscription: plan, customer id and a fresh credit period.
    ///
    /// Returns the updated profile, or `None` if no profile matched.
    async fn activate_subscription(
        &self,
        user_id: &str,
        plan: Plan,
        customer_id: Option<String>,
    ) -> Result<Option<Profile>, AppError>;

    /// Moves every profile of a payment customer to the free plan and returns them.
    async fn downgrade_customer(&self, customer_id: &str) -> Result<Vec<Profile>, AppError>;

    /// All profiles, newest first.
    async fn list_summaries(&self) -> Result<Vec<ProfileSummary>, AppError>;
}
