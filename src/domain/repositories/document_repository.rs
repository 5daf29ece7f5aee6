//! Repository trait for generated-document history.

use crate::domain::entities::{DocumentRecord, NewDocumentRecord};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Access to `document_history`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDocumentRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn insert(&self, record: NewDocumentRecord) -> Result<(), AppError>;

    /// Number of documents a user created at or after `since`.
    async fn count_for_user_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError>;

    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, AppError>;

    /// Documents created at or after `since`, newest first.
    async fn list_since(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<DocumentRecord>, AppError>;

    /// A user's documents, newest first.
    async fn list_for_user(&self, user_id: &str, limit: i64)
    -> Result<Vec<DocumentRecord>, AppError>;
}
