//! SEO categories published in the sitemap.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitemapCategory {
    pub id: i32,
    pub slug: &'static str,
}

pub const CATEGORIES: [SitemapCategory; 14] = [
    SitemapCategory { id: 1, slug: "invoices" },
    SitemapCategory { id: 2, slug: "pay-stubs" },
    SitemapCategory { id: 3, slug: "receipts" },
    SitemapCategory { id: 4, slug: "contracts" },
    SitemapCategory { id: 5, slug: "business" },
    SitemapCategory { id: 6, slug: "employment" },
    SitemapCategory { id: 7, slug: "legal" },
    SitemapCategory { id: 8, slug: "real-estate" },
    SitemapCategory { id: 9, slug: "healthcare" },
    SitemapCategory { id: 10, slug: "construction" },
    SitemapCategory { id: 11, slug: "education" },
    SitemapCategory { id: 12, slug: "personal" },
    SitemapCategory { id: 13, slug: "government" },
    SitemapCategory { id: 14, slug: "automotive" },
];

/// Maximum number of URLs in one category sitemap.
pub const MAX_URLS_PER_SITEMAP: i64 = 10_000;

pub fn find_category(slug: &str) -> Option<SitemapCategory> {
    CATEGORIES.iter().copied().find(|c| c.slug == slug)
}
