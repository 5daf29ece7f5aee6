//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated with
//! `mockall` for unit tests, and `tests/common` carries in-memory fakes for the
//! handler tests.
//!
//! # Available Repositories
//!
//! - [`ProfileRepository`] - plans, credits, activity days
//! - [`DocumentRepository`] - generation history
//! - [`SessionRepository`] / [`ActivityFlagRepository`] - logins and suspicious activity
//! - [`TemplateRepository`] - template catalog and SEO pages
//! - [`EmailLogRepository`] - sent-email log for cooldowns
//! - [`TrainingRepository`] - evaluations, golden samples, training runs
//! - [`StyleRepository`] - per-user style fingerprints

pub mod document_repository;
pub mod email_log_repository;
pub mod profile_repository;
pub mod session_repository;
pub mod style_repository;
pub mod template_repository;
pub mod training_repository;

pub use document_repository::DocumentRepository;
pub use email_log_repository::EmailLogRepository;
pub use profile_repository::ProfileRepository;
pub use session_repository::{ActivityFlagRepository, SessionRepository};
pub use style_repository::StyleRepository;
pub use template_repository::TemplateRepository;
pub use training_repository::TrainingRepository;

#[cfg(test)]
pub use document_repository::MockDocumentRepository;
#[cfg(test)]
pub use email_log_repository::MockEmailLogRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use session_repository::{MockActivityFlagRepository, MockSessionRepository};
#[cfg(test)]
pub use style_repository::MockStyleRepository;
#[cfg(test)]
pub use template_repository::MockTemplateRepository;
#[cfg(test)]
pub use training_repository::MockTrainingRepository;
