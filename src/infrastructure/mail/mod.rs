//! Transactional email delivery.
//!
//! - [`Mailer`] - trait over the email provider
//! - [`ResendMailer`] - Resend REST implementation

mod resend;
mod service;

pub use resend::ResendMailer;
pub use service::{MailError, MailResult, Mailer, OutgoingEmail, SentEmail};

#[cfg(test)]
pub use service::MockMailer;
