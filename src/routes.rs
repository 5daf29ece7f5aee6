//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health` - Health check (public)
//! - `/api/*`       - REST API, guarded per group
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, for the static site and the editor
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Admin bearer, admin key or cron secret, per route group
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::http::{Method, header};
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let public = api::routes::public_routes()
        .merge(api::routes::webhook_routes())
        .layer(rate_limit::layer(behind_proxy));

    let billing = api::routes::billing_routes().layer(rate_limit::secure_layer(behind_proxy));

    let admin = api::routes::admin_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_layer,
        ))
        .layer(rate_limit::secure_layer(behind_proxy));

    let catalog = api::routes::catalog_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_key_layer,
        ))
        .layer(rate_limit::secure_layer(behind_proxy));

    let cron = api::routes::cron_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::cron_layer,
        ))
        .layer(rate_limit::secure_layer(behind_proxy));

    let api_router = Router::new()
        .merge(public)
        .merge(billing)
        .merge(admin)
        .merge(catalog)
        .merge(cron);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(cors_layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
