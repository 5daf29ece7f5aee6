//! Access-token resolution against the hosted auth service.

mod service;
mod supabase;

pub use service::{AuthUser, IdentityError, IdentityProvider, IdentityResult};
pub use supabase::SupabaseAuth;

#[cfg(test)]
pub use service::MockIdentityProvider;
