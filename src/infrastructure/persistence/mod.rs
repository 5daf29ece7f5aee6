//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx runtime
//! queries. UUID keys are exchanged as text and cast in SQL.
//!
//! # Repositories
//!
//! - [`PgProfileRepository`] - plans, credits, activity days
//! - [`PgDocumentRepository`] - generation history
//! - [`PgSessionRepository`] / [`PgActivityFlagRepository`] - logins and flags
//! - [`PgTemplateRepository`] - template catalog and SEO pages
//! - [`PgEmailLogRepository`] - sent-email log
//! - [`PgTrainingRepository`] - evaluations, golden samples, runs
//! - [`PgStyleRepository`] - per-user style fingerprints
//! - [`PgHealthCheck`] - liveness check for `/health`

pub mod health;
pub mod pg_document_repository;
pub mod pg_email_log_repository;
pub mod pg_profile_repository;
pub mod pg_session_repository;
pub mod pg_style_repository;
pub mod pg_template_repository;
pub mod pg_training_repository;

pub use health::{DatabaseHealth, PgHealthCheck};
pub use pg_document_repository::PgDocumentRepository;
pub use pg_email_log_repository::PgEmailLogRepository;
pub use pg_profile_repository::PgProfileRepository;
pub use pg_session_repository::{PgActivityFlagRepository, PgSessionRepository};
pub use pg_style_repository::PgStyleRepository;
pub use pg_template_repository::PgTemplateRepository;
pub use pg_training_repository::PgTrainingRepository;
