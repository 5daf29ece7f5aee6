//! DTOs for transactional email dispatch.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::email_service::SendOutcome;
use crate::application::services::email_templates::EmailData;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[validate(
        required(message = "Missing userId, email, or type"),
        length(min = 1, message = "Missing userId, email, or type")
    )]
    pub user_id: Option<String>,

    #[validate(
        required(message = "Missing userId, email, or type"),
        length(min = 1, message = "Missing userId, email, or type")
    )]
    pub email: Option<String>,

    #[serde(rename = "type")]
    #[validate(
        required(message = "Missing userId, email, or type"),
        length(min = 1, message = "Missing userId, email, or type")
    )]
    pub email_type: Option<String>,

    #[serde(default)]
    pub data: EmailData,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SendEmailResponse {
    Sent { success: bool, id: Option<String> },
    Skipped { skipped: bool, reason: &'static str },
}

impl From<SendOutcome> for SendEmailResponse {
    fn from(outcome: SendOutcome) -> Self {
        match outcome {
            SendOutcome::Sent { id } => SendEmailResponse::Sent { success: true, id },
            SendOutcome::Skipped => SendEmailResponse::Skipped {
                skipped: true,
                reason: "cooldown",
            },
        }
    }
}
