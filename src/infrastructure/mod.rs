//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the traits the domain and application layers depend on.
//!
//! # Modules
//!
//! - [`identity`] - access-token lookup (Supabase Auth)
//! - [`llm`] - hosted LLM completions (Anthropic)
//! - [`mail`] - transactional email (Resend)
//! - [`payments`] - subscription billing and webhooks (Stripe)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod identity;
pub mod llm;
pub mod mail;
pub mod payments;
pub mod persistence;
