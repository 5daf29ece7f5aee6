//! Repository trait for the sent-email log.

use crate::domain::entities::{EmailType, NewEmailLog};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Access to `email_log`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailLogRepository: Send + Sync {
    /// When this email type was last sent to the user, if ever.
    async fn last_sent_at(
        &self,
        user_id: &str,
        email_type: EmailType,
    ) -> Result<Option<DateTime<Utc>>, AppError>;

    async fn record(&self, entry: NewEmailLog) -> Result<(), AppError>;
}
