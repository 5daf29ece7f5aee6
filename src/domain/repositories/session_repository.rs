//! Repository traits for login sessions and activity flags.

use crate::domain::entities::{
    ActivityFlag, NewActivityFlag, NewUserSession, UserActivitySummary, UserSession,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Access to `user_sessions` and the visitor-tracking views.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert(&self, session: NewUserSession) -> Result<(), AppError>;

    /// Distinct IP addresses a user logged in from since `since`.
    async fn distinct_ips_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<String>, AppError>;

    /// Sessions active at or after `since`.
    async fn count_active_since(&self, since: DateTime<Utc>) -> Result<i64, AppError>;

    /// A user's sessions, most recent login first.
    async fn list_for_user(&self, user_id: &str, limit: i64) -> Result<Vec<UserSession>, AppError>;

    async fn activity_summary(&self) -> Result<Vec<UserActivitySummary>, AppError>;

    /// Rows of the `url_clicks_summary` view as JSON objects.
    async fn url_click_summary(&self, limit: i64) -> Result<Vec<Value>, AppError>;
}

/// Access to `activity_flags`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgActivityFlagRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityFlagRepository: Send + Sync {
    async fn insert(&self, flag: NewActivityFlag) -> Result<(), AppError>;

    async fn count_unresolved(&self) -> Result<i64, AppError>;

    /// Unresolved flags, newest first.
    async fn list_unresolved(&self) -> Result<Vec<ActivityFlag>, AppError>;

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ActivityFlag>, AppError>;

    /// Marks a flag resolved. Returns `None` when the flag does not exist.
    async fn resolve(
        &self,
        flag_id: &str,
        resolved_by: &str,
    ) -> Result<Option<ActivityFlag>, AppError>;
}
