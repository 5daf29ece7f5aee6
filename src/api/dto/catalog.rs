//! DTOs for template catalog generation and listing.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

use crate::application::services::catalog_service::{
    BatchError, CatalogReport, ListParams, TemplateListing,
};
use crate::domain::catalog::CatalogBreakdown;
use crate::domain::entities::TemplateSummary;

#[derive(Debug, Default, Deserialize)]
pub struct AdminKeyQuery {
    pub key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateTemplatesResponse {
    pub success: bool,
    pub total_generated: usize,
    pub inserted: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BatchError>,
    pub breakdown: CatalogBreakdown,
}

impl From<CatalogReport> for GenerateTemplatesResponse {
    fn from(report: CatalogReport) -> Self {
        Self {
            success: true,
            total_generated: report.total_generated,
            inserted: report.inserted,
            errors: report.errors,
            breakdown: report.breakdown,
        }
    }
}

/// Query string of `/api/templates-list`.
///
/// Numbers that do not parse fall back to the defaults.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct TemplatesListQuery {
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub limit: Option<i64>,

    pub search: Option<String>,
    pub industry: Option<String>,
    pub document_type: Option<String>,
    pub style_id: Option<String>,
    pub tier: Option<String>,
}

impl From<TemplatesListQuery> for ListParams {
    fn from(query: TemplatesListQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            search: query.search,
            industry: query.industry,
            document_type: query.document_type,
            style_id: query.style_id,
            tier: query.tier,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
pub struct TemplatesListResponse {
    pub templates: Vec<TemplateSummary>,
    pub pagination: PaginationDto,
}

impl From<TemplateListing> for TemplatesListResponse {
    fn from(listing: TemplateListing) -> Self {
        Self {
            pagination: PaginationDto {
                page: listing.page,
                page_size: listing.page_size,
                total: listing.total,
                total_pages: listing.total_pages,
                has_more: listing.has_more,
            },
            templates: listing.templates,
        }
    }
}
