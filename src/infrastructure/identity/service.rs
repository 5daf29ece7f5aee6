use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Identity provider is not configured")]
    NotConfigured,

    #[error("Identity transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Access token rejected")]
    InvalidToken,

    #[error("Identity provider returned {status}: {message}")]
    Api { status: u16, message: String },
}

pub type IdentityResult<T> = Result<T, IdentityError>;

/// The user behind an access token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Resolves bearer access tokens to users.
///
/// # Implementations
///
/// - [`crate::infrastructure::identity::SupabaseAuth`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// # Errors
    ///
    /// [`IdentityError::InvalidToken`] when the token is expired, malformed or unknown.
    async fn user_for_token(&self, access_token: &str) -> IdentityResult<AuthUser>;
}
