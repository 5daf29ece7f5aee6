mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use draftmyforms_api::api::handlers::sitemap_handler;

fn server(state: draftmyforms_api::AppState) -> TestServer {
    let app = Router::new()
        .route("/api/sitemap", get(sitemap_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_sitemap_index() {
    let (state, _ctx) = common::create_test_state();
    let server = server(state);

    let response = server.get("/api/sitemap").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/xml");
    assert_eq!(
        response.header("cache-control"),
        "s-maxage=3600, stale-while-revalidate"
    );

    let xml = response.text();
    assert!(xml.contains("<sitemapindex"));
    assert_eq!(xml.matches("<loc>").count(), 15);
    assert!(xml.contains("<loc>https://www.draftmyforms.com/api/sitemap?cat=invoices</loc>"));
    assert!(xml.contains("<loc>https://www.draftmyforms.com/sitemap.xml</loc>"));
}

#[tokio::test]
async fn test_sitemap_empty_category_param_serves_index() {
    let (state, _ctx) = common::create_test_state();
    let server = server(state);

    let response = server.get("/api/sitemap").add_query_param("cat", "").await;

    response.assert_status_ok();
    assert!(response.text().contains("<sitemapindex"));
}

#[tokio::test]
async fn test_sitemap_category_lists_pages() {
    let (state, ctx) = common::create_test_state();
    ctx.templates.add_seo_page(1, "modern-invoice-construction");
    ctx.templates.add_seo_page(1, "classic-invoice-retail");
    ctx.templates.add_seo_page(2, "simple-receipt");
    let server = server(state);

    let response = server.get("/api/sitemap").add_query_param("cat", "invoices").await;

    response.assert_status_ok();
    let xml = response.text();
    assert!(xml.contains("<urlset"));
    assert_eq!(xml.matches("<url>").count(), 2);
    assert!(xml.contains(
        "<loc>https://www.draftmyforms.com/templates.html?template=modern-invoice-construction</loc>"
    ));
    assert!(!xml.contains("simple-receipt"));
}

#[tokio::test]
async fn test_sitemap_unknown_category() {
    let (state, _ctx) = common::create_test_state();
    let server = server(state);

    let response = server.get("/api/sitemap").add_query_param("cat", "recipes").await;

    response.assert_status_not_found();
}
