//! Business logic services for the application layer.

pub mod admin_service;
pub mod auth_service;
pub mod billing_service;
pub mod catalog_service;
pub mod email_service;
pub mod email_templates;
pub mod generation_service;
pub mod session_service;
pub mod sitemap_service;
pub mod style_service;
pub mod training_service;
pub mod webhook_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use billing_service::BillingService;
pub use catalog_service::CatalogService;
pub use email_service::EmailService;
pub use generation_service::GenerationService;
pub use session_service::SessionService;
pub use sitemap_service::SitemapService;
pub use style_service::StyleService;
pub use training_service::TrainingService;
pub use webhook_service::WebhookService;
