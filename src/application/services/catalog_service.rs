//! Template catalog: regeneration and paginated listing.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::catalog::{self, CatalogBreakdown};
use crate::domain::entities::{TemplateFilter, TemplateSummary, TierCount};
use crate::domain::repositories::TemplateRepository;
use crate::error::AppError;

/// Rows per insert statement.
pub const INSERT_BATCH_SIZE: usize = 500;

pub const DEFAULT_PAGE_SIZE: i64 = 30;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchError {
    pub batch: usize,
    pub error: String,
}

/// Result of a full catalog rebuild.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport {
    pub total_generated: usize,
    pub inserted: u64,
    pub errors: Vec<BatchError>,
    pub breakdown: CatalogBreakdown,
}

/// Raw listing parameters as received from the query string.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub industry: Option<String>,
    pub document_type: Option<String>,
    pub style_id: Option<String>,
    pub tier: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TemplateListing {
    pub templates: Vec<TemplateSummary>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

/// `None` for empty values and the `all` wildcard.
fn filter_value(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "all")
}

/// Page number (at least 1) and page size (1..=100).
pub fn clamp_paging(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.filter(|p| *p >= 1).unwrap_or(1);
    let page_size = match limit {
        Some(l) if l != 0 => l.clamp(1, MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    };
    (page, page_size)
}

pub struct CatalogService {
    templates: Arc<dyn TemplateRepository>,
}

impl CatalogService {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    /// Replaces the whole catalog with a freshly generated one.
    ///
    /// A failing batch does not stop the rebuild; it is reported in
    /// [`CatalogReport::errors`].
    ///
    /// # Errors
    ///
    /// Returns an internal error if the existing rows cannot be removed.
    pub async fn regenerate(&self) -> Result<CatalogReport, AppError> {
        let rows = catalog::generate();
        let total_generated = rows.len();

        let deleted = self.templates.delete_all().await.map_err(|e| {
            AppError::internal(
                "Failed to clear old templates",
                json!({ "reason": e.to_string() }),
            )
        })?;
        info!(deleted, "Cleared template catalog");

        let mut inserted = 0;
        let mut errors = Vec::new();

        for (batch, chunk) in rows.chunks(INSERT_BATCH_SIZE).enumerate() {
            match self.templates.insert_batch(chunk.to_vec()).await {
                Ok(n) => inserted += n,
                Err(e) => {
                    warn!(batch, error = %e, "Template batch insert failed");
                    errors.push(BatchError {
                        batch,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(total_generated, inserted, failed_batches = errors.len(), "Template catalog rebuilt");

        Ok(CatalogReport {
            total_generated,
            inserted,
            errors,
            breakdown: catalog::breakdown(),
        })
    }

    /// One page of active templates.
    ///
    /// # Errors
    ///
    /// Returns an internal "Failed to fetch templates" error when the query fails.
    pub async fn list(&self, params: ListParams) -> Result<TemplateListing, AppError> {
        let (page, page_size) = clamp_paging(params.page, params.limit);
        let offset = (page - 1).saturating_mul(page_size);

        let filter = TemplateFilter {
            search: params.search.filter(|s| !s.is_empty()),
            industry: filter_value(params.industry),
            document_type: filter_value(params.document_type),
            style_id: filter_value(params.style_id),
            tier: filter_value(params.tier),
            offset,
            limit: page_size,
        };

        let result = self.templates.list(filter).await.map_err(|e| {
            AppError::internal(
                "Failed to fetch templates",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let total = result.total;
        Ok(TemplateListing {
            templates: result.templates,
            page,
            page_size,
            total,
            total_pages: (total + page_size - 1) / page_size,
            has_more: offset.saturating_add(page_size) < total,
        })
    }

    pub async fn tier_counts(&self) -> Result<Vec<TierCount>, AppError> {
        self.templates.count_by_tier().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TemplatePage;
    use crate::domain::repositories::MockTemplateRepository;

    #[test]
    fn test_clamp_paging() {
        assert_eq!(clamp_paging(None, None), (1, 30));
        assert_eq!(clamp_paging(Some(0), Some(0)), (1, 30));
        assert_eq!(clamp_paging(Some(-3), Some(-5)), (1, 1));
        assert_eq!(clamp_paging(Some(4), Some(500)), (4, 100));
        assert_eq!(clamp_paging(Some(2), Some(10)), (2, 10));
    }

    #[test]
    fn test_filter_value() {
        assert_eq!(filter_value(Some("all".to_string())), None);
        assert_eq!(filter_value(Some(String::new())), None);
        assert_eq!(filter_value(Some("dental".to_string())).as_deref(), Some("dental"));
    }

    #[tokio::test]
    async fn test_regenerate_inserts_in_batches_and_collects_errors() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_delete_all().times(1).returning(|| Ok(10));

        let mut calls = 0usize;
        repo.expect_insert_batch()
            .withf(|rows| rows.len() <= INSERT_BATCH_SIZE)
            .returning(move |rows| {
                calls += 1;
                if calls == 2 {
                    Err(AppError::internal("duplicate slug", json!({})))
                } else {
                    Ok(rows.len() as u64)
                }
            });

        let report = CatalogService::new(Arc::new(repo)).regenerate().await.unwrap();

        let expected = catalog::breakdown().expected;
        assert_eq!(report.total_generated, expected);
        assert_eq!(report.inserted as usize, expected - INSERT_BATCH_SIZE);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].batch, 1);
    }

    #[tokio::test]
    async fn test_regenerate_stops_when_delete_fails() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_delete_all()
            .returning(|| Err(AppError::internal("Database error", json!({}))));
        repo.expect_insert_batch().never();

        let err = CatalogService::new(Arc::new(repo)).regenerate().await.unwrap_err();
        match err {
            AppError::Internal { message, .. } => assert_eq!(message, "Failed to clear old templates"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_builds_filter_and_pagination() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_list()
            .withf(|f| {
                f.offset == 20
                    && f.limit == 10
                    && f.industry.is_none()
                    && f.tier.as_deref() == Some("pro")
                    && f.search.as_deref() == Some("gold")
            })
            .returning(|_| {
                Ok(TemplatePage {
                    templates: vec![],
                    total: 31,
                })
            });

        let listing = CatalogService::new(Arc::new(repo))
            .list(ListParams {
                page: Some(3),
                limit: Some(10),
                search: Some("gold".to_string()),
                industry: Some("all".to_string()),
                tier: Some("pro".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(listing.page, 3);
        assert_eq!(listing.total_pages, 4);
        assert!(listing.has_more);
    }

    #[tokio::test]
    async fn test_list_huge_page_is_empty() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_list()
            .withf(|f| f.offset == i64::MAX && f.limit == 30)
            .returning(|_| {
                Ok(TemplatePage {
                    templates: vec![],
                    total: 10_560,
                })
            });

        let listing = CatalogService::new(Arc::new(repo))
            .list(ListParams {
                page: Some(i64::MAX),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(listing.page, i64::MAX);
        assert!(listing.templates.is_empty());
        assert!(!listing.has_more);
    }
}
