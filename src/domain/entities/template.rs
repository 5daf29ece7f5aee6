//! Catalog templates and SEO pages.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::plan::Plan;

/// A catalog row produced by the generator, ready to insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTemplate {
    pub name: String,
    pub slug: String,
    pub category: String,
    pub tier: Plan,
    pub style_id: String,
    pub style_name: String,
    pub industry: String,
    pub document_type: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub heading_font: String,
    pub body_font: String,
    pub mood: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub fields: Value,
}

/// A catalog row as listed to browsers.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TemplateSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub tier: String,
    pub style_id: String,
    pub style_name: String,
    pub industry: String,
    pub document_type: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub heading_font: String,
    pub body_font: String,
    pub mood: String,
    pub is_active: bool,
    pub sort_order: i32,
}

/// Listing filters. `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateFilter {
    pub search: Option<String>,
    pub industry: Option<String>,
    pub document_type: Option<String>,
    pub style_id: Option<String>,
    pub tier: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone)]
pub struct TemplatePage {
    pub templates: Vec<TemplateSummary>,
    pub total: i64,
}

/// Number of active templates per tier.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TierCount {
    pub tier: String,
    pub count: i64,
}

/// A public SEO landing page listed in the sitemap.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SeoTemplate {
    pub slug: String,
    pub updated_at: Option<DateTime<Utc>>,
}
