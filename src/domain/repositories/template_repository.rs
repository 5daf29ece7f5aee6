//! Repository trait for the template catalog and SEO pages.

use crate::domain::entities::{NewTemplate, SeoTemplate, TemplateFilter, TemplatePage, TierCount};
use crate::error::AppError;
use async_trait::async_trait;

/// Access to `templates` and `seo_templates`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTemplateRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Removes every catalog row. Returns the number deleted.
    async fn delete_all(&self) -> Result<u64, AppError>;

    /// Inserts one batch of catalog rows. Returns the number inserted.
    async fn insert_batch(&self, templates: Vec<NewTemplate>) -> Result<u64, AppError>;

    /// Active templates matching `filter`, ordered by `sort_order`, plus the total match count.
    async fn list(&self, filter: TemplateFilter) -> Result<TemplatePage, AppError>;

    async fn count_by_tier(&self) -> Result<Vec<TierCount>, AppError>;

    /// SEO pages of a sitemap category, ordered by id.
    async fn seo_pages_for_category(
        &self,
        category_id: i32,
        limit: i64,
    ) -> Result<Vec<SeoTemplate>, AppError>;
}
