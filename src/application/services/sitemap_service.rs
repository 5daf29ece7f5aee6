//! XML sitemaps for the public SEO template pages.

use askama::Template;
use chrono::{NaiveDate, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::domain::entities::SeoTemplate;
use crate::domain::repositories::TemplateRepository;
use crate::domain::sitemap::{CATEGORIES, MAX_URLS_PER_SITEMAP, find_category};
use crate::error::AppError;

#[derive(Template)]
#[template(path = "sitemap/index.xml")]
struct SitemapIndex<'a> {
    locations: Vec<String>,
    today: &'a str,
}

struct UrlEntry {
    loc: String,
    lastmod: String,
}

#[derive(Template)]
#[template(path = "sitemap/urlset.xml")]
struct UrlSet {
    entries: Vec<UrlEntry>,
}

/// Bytes left alone by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

fn sitemap_failed(reason: impl ToString) -> AppError {
    let reason = reason.to_string();
    error!(%reason, "Sitemap error");
    AppError::internal("Failed to generate sitemap", json!({ "reason": reason }))
}

pub struct SitemapService {
    templates: Arc<dyn TemplateRepository>,
    base_url: String,
}

impl SitemapService {
    pub fn new(templates: Arc<dyn TemplateRepository>, base_url: impl Into<String>) -> Self {
        Self {
            templates,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Sitemap index: one entry per category plus the static `sitemap.xml`.
    pub fn index(&self) -> Result<String, AppError> {
        self.render_index(Utc::now().date_naive())
    }

    fn render_index(&self, today: NaiveDate) -> Result<String, AppError> {
        let mut locations: Vec<String> = CATEGORIES
            .iter()
            .map(|c| format!("{}/api/sitemap?cat={}", self.base_url, c.slug))
            .collect();
        locations.push(format!("{}/sitemap.xml", self.base_url));

        SitemapIndex {
            locations,
            today: &today.to_string(),
        }
        .render()
        .map_err(sitemap_failed)
    }

    /// URL set of one category.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for an unknown category slug
    /// - [`AppError::Internal`] when the pages cannot be loaded or rendered
    pub async fn category(&self, slug: &str) -> Result<String, AppError> {
        let category = find_category(slug)
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "cat": slug })))?;

        let pages = self
            .templates
            .seo_pages_for_category(category.id, MAX_URLS_PER_SITEMAP)
            .await
            .map_err(sitemap_failed)?;

        self.render_urlset(&pages, Utc::now().date_naive())
    }

    fn render_urlset(&self, pages: &[SeoTemplate], today: NaiveDate) -> Result<String, AppError> {
        let entries = pages
            .iter()
            .map(|page| UrlEntry {
                loc: format!(
                    "{}/templates.html?template={}",
                    self.base_url,
                    encode_component(&page.slug)
                ),
                lastmod: page
                    .updated_at
                    .map(|at| at.date_naive())
                    .unwrap_or(today)
                    .to_string(),
            })
            .collect();

        UrlSet { entries }.render().map_err(sitemap_failed)
    }
}
