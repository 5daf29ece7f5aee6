use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Email provider is not configured")]
    NotConfigured,

    #[error("Email transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Email provider returned {status}: {message}")]
    Api { status: u16, message: String },
}

pub type MailResult<T> = Result<T, MailError>;

/// A fully rendered message ready for the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub reply_to: Option<String>,
}

/// Provider acknowledgement.
#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub id: Option<String>,
}

/// Trait for transactional email providers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> MailResult<SentEmail>;
}
