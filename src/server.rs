//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, provider clients and the Axum server lifecycle.

use crate::application::services::auth_service::AccessPolicy;
use crate::application::services::billing_service::PriceCatalog;
use crate::application::services::email_service::EmailSettings;
use crate::config::Config;
use crate::infrastructure::identity::SupabaseAuth;
use crate::infrastructure::llm::AnthropicClient;
use crate::infrastructure::mail::ResendMailer;
use crate::infrastructure::payments::StripeClient;
use crate::infrastructure::persistence::{
    PgActivityFlagRepository, PgDocumentRepository, PgEmailLogRepository, PgHealthCheck,
    PgProfileRepository, PgSessionRepository, PgStyleRepository, PgTemplateRepository,
    PgTrainingRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, Providers, Repositories, Settings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error when the first connection cannot be established.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Builds the shared application state from a pool and the configuration.
///
/// All outbound clients share one `reqwest::Client` with the configured timeout.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_state(pool: PgPool, config: &Config) -> Result<AppState> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .build()
        .context("Failed to build HTTP client")?;

    let pool = Arc::new(pool);
    let repos = Repositories {
        profiles: Arc::new(PgProfileRepository::new(pool.clone())),
        documents: Arc::new(PgDocumentRepository::new(pool.clone())),
        sessions: Arc::new(PgSessionRepository::new(pool.clone())),
        flags: Arc::new(PgActivityFlagRepository::new(pool.clone())),
        templates: Arc::new(PgTemplateRepository::new(pool.clone())),
        email_log: Arc::new(PgEmailLogRepository::new(pool.clone())),
        training: Arc::new(PgTrainingRepository::new(pool.clone())),
        styles: Arc::new(PgStyleRepository::new(pool.clone())),
        health: Arc::new(PgHealthCheck::new(pool)),
    };

    let providers = Providers {
        llm: Arc::new(AnthropicClient::new(
            http.clone(),
            config.anthropic_api_url.clone(),
            config.anthropic_api_key.clone(),
            config.llm_model.clone(),
        )),
        payments: Arc::new(StripeClient::new(
            http.clone(),
            config.stripe_api_url.clone(),
            config.stripe_secret_key.clone(),
            config.stripe_webhook_secret.clone(),
        )),
        mailer: Arc::new(ResendMailer::new(
            http.clone(),
            config.resend_api_url.clone(),
            config.resend_api_key.clone(),
        )),
        identity: Arc::new(SupabaseAuth::new(
            http,
            config.supabase_url.clone(),
            config.supabase_service_role_key.clone(),
        )),
    };

    let settings = Settings {
        app_url: config.app_url.clone(),
        site_url: config.site_url.clone(),
        email: EmailSettings {
            from: config.email_from.clone(),
            reply_to: config.email_reply_to.clone(),
            app_url: config.app_url.clone(),
        },
        prices: PriceCatalog {
            pro: config.stripe_pro_price_id.clone(),
            business: config.stripe_business_price_id.clone(),
        },
        access: AccessPolicy {
            admin_emails: config.admin_emails.clone(),
            admin_secret_key: config.admin_secret_key.clone(),
            cron_secret: config.cron_secret.clone(),
        },
        generation_rate_limit_per_minute: config.generation_rate_limit_per_minute,
    };

    Ok(AppState::new(repos, providers, settings))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations, when `RUN_MIGRATIONS=true`
/// - Provider clients and services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations applied");
    }

    let state = build_state(pool, &config)?;
    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
