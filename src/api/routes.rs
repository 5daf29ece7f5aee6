//! API route configuration.
//!
//! Routes are grouped by the guard in front of them. The guards themselves live in
//! [`crate::api::middleware::auth`] and are attached in [`crate::routes::app_router`].

use crate::api::handlers::{
    admin_handler, auth_callback_handler, create_checkout_handler, create_portal_handler,
    extract_style_handler, generate_handler, generate_templates_handler, log_activity_handler,
    nightly_training_handler, send_email_handler, sitemap_handler, templates_list_handler,
    verify_session_handler, weekly_report_handler, webhook_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes open to the browser client.
///
/// # Endpoints
///
/// - `POST /ai-generate`    - Generate or edit a document
/// - `POST /extract-style`  - Store the style fingerprint of a document
/// - `POST /auth-callback`  - Log a sign-in
/// - `POST /log-activity`   - Count an active day toward the trial
/// - `POST /send-email`     - Send a transactional email
/// - `GET  /templates-list` - Paginated template catalog
/// - `GET  /sitemap`        - Sitemap index or category urlset
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/ai-generate", post(generate_handler))
        .route("/extract-style", post(extract_style_handler))
        .route("/auth-callback", post(auth_callback_handler))
        .route("/log-activity", post(log_activity_handler))
        .route("/send-email", post(send_email_handler))
        .route("/templates-list", get(templates_list_handler))
        .route("/sitemap", get(sitemap_handler))
}

/// Checkout, portal and plan verification.
///
/// - `POST /create-checkout-session`
/// - `POST /create-portal-session`
/// - `POST /verify-session`
pub fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/create-checkout-session", post(create_checkout_handler))
        .route("/create-portal-session", post(create_portal_handler))
        .route("/verify-session", post(verify_session_handler))
}

/// `POST /webhook`, authenticated by its payload signature.
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhook", post(webhook_handler))
}

/// `GET|POST|PATCH /admin-api`, requires an allowlisted admin bearer token.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/admin-api",
        get(admin_handler).post(admin_handler).patch(admin_handler),
    )
}

/// `POST /generate-templates`, requires the admin key or an admin bearer token.
pub fn catalog_routes() -> Router<AppState> {
    Router::new().route("/generate-templates", post(generate_templates_handler))
}

/// Scheduled jobs, requires the cron secret.
///
/// - `GET|POST /cron/nightly-training`
/// - `GET|POST /cron/weekly-report`
pub fn cron_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cron/nightly-training",
            get(nightly_training_handler).post(nightly_training_handler),
        )
        .route(
            "/cron/weekly-report",
            get(weekly_report_handler).post(weekly_report_handler),
        )
}
