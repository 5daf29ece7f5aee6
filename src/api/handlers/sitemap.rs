//! Handler for the XML sitemaps.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};

use crate::api::dto::sitemap::SitemapQuery;
use crate::error::AppError;
use crate::state::AppState;

const CACHE_CONTROL: &str = "s-maxage=3600, stale-while-revalidate";

/// Serves the sitemap index, or the urlset of one category when `cat` is given.
///
/// # Endpoint
///
/// `GET /api/sitemap` or `GET /api/sitemap?cat=<slug>`
///
/// # Errors
///
/// - 404 when the category slug is unknown
/// - 500 when the template query fails
pub async fn sitemap_handler(
    State(state): State<AppState>,
    Query(query): Query<SitemapQuery>,
) -> Result<impl IntoResponse, AppError> {
    let xml = match query.cat.as_deref().filter(|c| !c.is_empty()) {
        Some(slug) => state.sitemap_service.category(slug).await?,
        None => state.sitemap_service.index()?,
    };

    Ok((
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        xml,
    ))
}
