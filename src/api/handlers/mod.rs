//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod billing;
pub mod catalog;
pub mod cron;
pub mod email;
pub mod generate;
pub mod health;
pub mod session;
pub mod sitemap;
pub mod style;
pub mod webhook;

pub use admin::admin_handler;
pub use billing::{create_checkout_handler, create_portal_handler, verify_session_handler};
pub use catalog::{generate_templates_handler, templates_list_handler};
pub use cron::{nightly_training_handler, weekly_report_handler};
pub use email::send_email_handler;
pub use generate::generate_handler;
pub use health::health_handler;
pub use session::{auth_callback_handler, log_activity_handler};
pub use sitemap::sitemap_handler;
pub use style::extract_style_handler;
pub use webhook::webhook_handler;
