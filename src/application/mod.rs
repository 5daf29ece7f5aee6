//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, external providers and business rules,
//! and expose a handler-facing API. They hold their collaborators as trait
//! objects so unit tests can substitute `mockall` mocks.
//!
//! # Available Services
//!
//! - [`services::generation_service::GenerationService`] - AI document generation and editing
//! - [`services::style_service::StyleService`] - style fingerprint extraction
//! - [`services::admin_service::AdminService`] - admin dashboard queries
//! - [`services::session_service::SessionService`] - login sessions and activity days
//! - [`services::billing_service::BillingService`] - checkout, portal and session verification
//! - [`services::webhook_service::WebhookService`] - payment webhook events
//! - [`services::catalog_service::CatalogService`] - template catalog rebuild and listing
//! - [`services::sitemap_service::SitemapService`] - XML sitemaps
//! - [`services::training_service::TrainingService`] - nightly evaluation and weekly report
//! - [`services::email_service::EmailService`] - transactional email with cooldowns
//! - [`services::auth_service::AuthService`] - admin and cron access checks

pub mod services;
