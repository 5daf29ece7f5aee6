//! Repository trait for per-user document styles.

use crate::domain::entities::StyleFingerprint;
use crate::error::AppError;
use async_trait::async_trait;

/// Access to `document_styles`, keyed by (user, document type).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StyleRepository: Send + Sync {
    async fn find(
        &self,
        user_id: &str,
        document_type: &str,
    ) -> Result<Option<StyleFingerprint>, AppError>;

    /// Inserts or replaces the fingerprint for (user, document type).
    async fn upsert(
        &self,
        user_id: &str,
        document_type: &str,
        fingerprint: StyleFingerprint,
    ) -> Result<(), AppError>;
}
