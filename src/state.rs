//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::auth_service::AccessPolicy;
use crate::application::services::billing_service::PriceCatalog;
use crate::application::services::email_service::EmailSettings;
use crate::application::services::generation_service::GenerationSideEffects;
use crate::application::services::{
    AdminService, AuthService, BillingService, CatalogService, EmailService, GenerationService,
    SessionService, SitemapService, StyleService, TrainingService, WebhookService,
};
use crate::domain::repositories::{
    ActivityFlagRepository, DocumentRepository, EmailLogRepository, ProfileRepository,
    SessionRepository, StyleRepository, TemplateRepository, TrainingRepository,
};
use crate::infrastructure::identity::IdentityProvider;
use crate::infrastructure::llm::LlmClient;
use crate::infrastructure::mail::Mailer;
use crate::infrastructure::payments::PaymentGateway;
use crate::infrastructure::persistence::DatabaseHealth;

/// Data access, one implementation per table group.
#[derive(Clone)]
pub struct Repositories {
    pub profiles: Arc<dyn ProfileRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub flags: Arc<dyn ActivityFlagRepository>,
    pub templates: Arc<dyn TemplateRepository>,
    pub email_log: Arc<dyn EmailLogRepository>,
    pub training: Arc<dyn TrainingRepository>,
    pub styles: Arc<dyn StyleRepository>,
    pub health: Arc<dyn DatabaseHealth>,
}

/// Third-party service clients.
#[derive(Clone)]
pub struct Providers {
    pub llm: Arc<dyn LlmClient>,
    pub payments: Arc<dyn PaymentGateway>,
    pub mailer: Arc<dyn Mailer>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Non-secret settings the services need.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_url: String,
    pub site_url: String,
    pub email: EmailSettings,
    pub prices: PriceCatalog,
    pub access: AccessPolicy,
    pub generation_rate_limit_per_minute: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub generation_service: Arc<GenerationService>,
    pub style_service: Arc<StyleService>,
    pub admin_service: Arc<AdminService>,
    pub session_service: Arc<SessionService>,
    pub billing_service: Arc<BillingService>,
    pub webhook_service: Arc<WebhookService>,
    pub catalog_service: Arc<CatalogService>,
    pub sitemap_service: Arc<SitemapService>,
    pub training_service: Arc<TrainingService>,
    pub email_service: Arc<EmailService>,
    pub auth_service: Arc<AuthService>,
    pub health: Arc<dyn DatabaseHealth>,
    /// Fallback for redirect URLs when a request carries no `Origin`.
    pub app_url: String,
}

impl AppState {
    /// Wires every service from its collaborators.
    pub fn new(repos: Repositories, providers: Providers, settings: Settings) -> Self {
        let email_service = Arc::new(EmailService::new(
            providers.mailer,
            repos.email_log,
            settings.email,
        ));
        let style_service = Arc::new(StyleService::new(
            providers.llm.clone(),
            repos.styles.clone(),
        ));

        let generation_service = Arc::new(GenerationService::new(
            providers.llm.clone(),
            repos.profiles.clone(),
            repos.documents.clone(),
            repos.styles,
            repos.training.clone(),
            GenerationSideEffects {
                styles: style_service.clone(),
                email: email_service.clone(),
            },
            settings.generation_rate_limit_per_minute,
        ));

        let admin_service = Arc::new(AdminService::new(
            repos.profiles.clone(),
            repos.documents.clone(),
            repos.sessions.clone(),
            repos.flags.clone(),
        ));

        let session_service = Arc::new(SessionService::new(
            repos.sessions,
            repos.flags,
            repos.profiles.clone(),
            email_service.clone(),
        ));

        let billing_service = Arc::new(BillingService::new(
            providers.payments.clone(),
            repos.profiles.clone(),
            settings.prices.clone(),
        ));

        let webhook_service = Arc::new(WebhookService::new(
            providers.payments,
            repos.profiles,
            settings.prices,
            email_service.clone(),
        ));

        let catalog_service = Arc::new(CatalogService::new(repos.templates.clone()));
        let sitemap_service = Arc::new(SitemapService::new(repos.templates, settings.site_url));
        let training_service = Arc::new(TrainingService::new(
            providers.llm,
            repos.documents,
            repos.training,
        ));
        let auth_service = Arc::new(AuthService::new(providers.identity, settings.access));

        Self {
            generation_service,
            style_service,
            admin_service,
            session_service,
            billing_service,
            webhook_service,
            catalog_service,
            sitemap_service,
            training_service,
            email_service,
            auth_service,
            health: repos.health,
            app_url: settings.app_url,
        }
    }
}
