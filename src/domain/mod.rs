//! Domain layer: entities, repository contracts and the static business rules.
//!
//! - [`entities`] - records and the rules attached to them
//! - [`repositories`] - data access traits implemented in `crate::infrastructure::persistence`
//! - [`catalog`] - the template catalog generator
//! - [`prompts`] - LLM prompt text
//! - [`sitemap`] - SEO categories

pub mod catalog;
pub mod entities;
pub mod prompts;
pub mod repositories;
pub mod sitemap;
