//! DTOs for AI document generation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::UUID_REGEX;
use crate::application::services::generation_service::{GenerationOutcome, TokenUsage};
use crate::domain::entities::{GenerationMode, Plan};

pub const MAX_PROMPT_CHARS: u64 = 10_000;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[validate(
        required(message = "Prompt is required"),
        length(min = 1, max = MAX_PROMPT_CHARS, message = "Prompt must be between 1 and 10000 characters")
    )]
    pub prompt: Option<String>,

    /// `edit` switches to edit mode; anything else generates.
    pub mode: Option<String>,

    pub doc_type: Option<String>,

    #[validate(
        required(message = "userId is required"),
        regex(path = *UUID_REGEX, message = "userId must be a UUID")
    )]
    pub user_id: Option<String>,

    pub current_html: Option<String>,

    pub email: Option<String>,
}

impl GenerateRequest {
    pub fn generation_mode(&self) -> GenerationMode {
        match self.mode.as_deref() {
            Some("edit") => GenerationMode::Edit,
            _ => GenerationMode::Generate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreditsDto {
    pub used: i32,
    pub limit: i32,
    pub remaining: i32,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub html: String,
    pub mode: GenerationMode,
    pub usage: TokenUsage,
    pub credits: CreditsDto,
    pub plan: Plan,
}

impl From<GenerationOutcome> for GenerateResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        Self {
            credits: CreditsDto {
                used: outcome.credits.used,
                limit: outcome.credits.limit,
                remaining: outcome.credits.remaining(),
            },
            html: outcome.html,
            mode: outcome.mode,
            usage: outcome.usage,
            plan: outcome.plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> GenerateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let req = request(json!({
            "prompt": "Invoice for ACME",
            "userId": "6f1c2a8e-0d4b-4a57-9b0e-2f3c4d5e6f70",
            "docType": "invoice"
        }));
        assert!(req.validate().is_ok());
        assert_eq!(req.generation_mode(), GenerationMode::Generate);
    }

    #[test]
    fn test_missing_prompt() {
        let req = request(json!({ "userId": "6f1c2a8e-0d4b-4a57-9b0e-2f3c4d5e6f70" }));
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("prompt"));
    }

    #[test]
    fn test_user_id_must_be_uuid() {
        let req = request(json!({ "prompt": "x", "userId": "user-1", "mode": "edit" }));
        assert!(req.validate().is_err());
        assert_eq!(req.generation_mode(), GenerationMode::Edit);
    }

    #[test]
    fn test_prompt_too_long() {
        let req = request(json!({
            "prompt": "a".repeat(MAX_PROMPT_CHARS as usize + 1),
            "userId": "6f1c2a8e-0d4b-4a57-9b0e-2f3c4d5e6f70"
        }));
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["prompt"][0].message.as_deref(),
            Some("Prompt must be between 1 and 10000 characters")
        );
    }

    #[test]
    fn test_prompt_at_limit() {
        let req = request(json!({
            "prompt": "a".repeat(MAX_PROMPT_CHARS as usize),
            "userId": "6f1c2a8e-0d4b-4a57-9b0e-2f3c4d5e6f70"
        }));
        assert!(req.validate().is_ok());
    }
}
