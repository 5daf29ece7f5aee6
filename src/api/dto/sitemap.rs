//! Query parameters of the sitemap endpoint.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SitemapQuery {
    /// Category slug; absent for the sitemap index.
    pub cat: Option<String>,
}
