//! Transactional email dispatch with per-type cooldowns.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::email_templates::{self, EmailData, EmailLinks};
use crate::domain::entities::{EmailType, NewEmailLog};
use crate::domain::repositories::EmailLogRepository;
use crate::error::AppError;
use crate::infrastructure::mail::{Mailer, OutgoingEmail};
use crate::utils::email_address::normalize_email;

/// Sender identity and links used in every message.
#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub from: String,
    pub reply_to: String,
    pub app_url: String,
}

/// Result of a send request.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    Sent { id: Option<String> },
    /// A message of the same type went to this user within its cooldown.
    Skipped,
}

/// Renders, throttles, sends and logs transactional emails.
///
/// Other services use [`EmailService::notify`] for their best-effort notifications.
pub struct EmailService {
    mailer: Arc<dyn Mailer>,
    email_log: Arc<dyn EmailLogRepository>,
    settings: EmailSettings,
}

impl EmailService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        email_log: Arc<dyn EmailLogRepository>,
        settings: EmailSettings,
    ) -> Self {
        Self {
            mailer,
            email_log,
            settings,
        }
    }

    /// Sends `email_type` to `to` unless the type's cooldown is still running.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] when the address is not valid
    /// - [`AppError::Upstream`] when the provider rejects the message
    pub async fn send(
        &self,
        user_id: &str,
        to: &str,
        email_type: EmailType,
        data: EmailData,
    ) -> Result<SendOutcome, AppError> {
        let to = normalize_email(to)
            .ok_or_else(|| AppError::bad_request("Invalid email", json!({ "field": "email" })))?;

        if !self.can_send(user_id, email_type).await {
            debug!(user_id, %email_type, "Email skipped, cooldown active");
            return Ok(SendOutcome::Skipped);
        }

        let links = EmailLinks {
            app_url: self.settings.app_url.clone(),
            support_address: self.settings.reply_to.clone(),
        };
        let rendered = email_templates::render(email_type, &to, &data, &links).map_err(|e| {
            AppError::internal("Failed to render email", json!({ "reason": e.to_string() }))
        })?;

        let sent = self
            .mailer
            .send(OutgoingEmail {
                from: self.settings.from.clone(),
                to: to.clone(),
                subject: rendered.subject,
                html: rendered.html,
                reply_to: Some(self.settings.reply_to.clone()),
            })
            .await?;

        let entry = NewEmailLog {
            user_id: user_id.to_string(),
            email_type,
            resend_id: sent.id.clone(),
        };
        if let Err(e) = self.email_log.record(entry).await {
            warn!(user_id, %email_type, error = %e, "Failed to record email log");
        }

        info!(user_id, %email_type, id = ?sent.id, "Email sent");
        Ok(SendOutcome::Sent { id: sent.id })
    }

    /// Sends in the background. Failures are logged and never reach the caller.
    pub fn notify(self: &Arc<Self>, user_id: String, to: String, email_type: EmailType, data: EmailData) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = service.send(&user_id, &to, email_type, data).await {
                warn!(%user_id, %email_type, error = %e, "Notification email failed");
            }
        });
    }

    /// A failing log lookup allows the send.
    async fn can_send(&self, user_id: &str, email_type: EmailType) -> bool {
        match self.email_log.last_sent_at(user_id, email_type).await {
            Ok(Some(sent_at)) => Utc::now() - sent_at >= email_type.cooldown(),
            Ok(None) => true,
            Err(e) => {
                warn!(user_id, %email_type, error = %e, "Email log lookup failed");
                true
            }
        }
    }
}
