//! DTOs for auth-session logging and activity tracking.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::session_service::ActivityOutcome;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthCallbackRequest {
    #[validate(
        required(message = "Missing userId or email"),
        length(min = 1, message = "Missing userId or email")
    )]
    pub user_id: Option<String>,

    #[validate(
        required(message = "Missing userId or email"),
        length(min = 1, message = "Missing userId or email")
    )]
    pub email: Option<String>,

    pub user_agent: Option<String>,

    #[serde(default)]
    pub is_new_user: bool,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogActivityRequest {
    #[validate(
        required(message = "Missing userId"),
        length(min = 1, message = "Missing userId")
    )]
    pub user_id: Option<String>,
}

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogActivityResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_logged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_eligible: Option<bool>,
}

impl From<ActivityOutcome> for LogActivityResponse {
    fn from(outcome: ActivityOutcome) -> Self {
        let ok = LogActivityResponse {
            ok: true,
            ..Default::default()
        };
        match outcome {
            ActivityOutcome::ProfileNotFound => LogActivityResponse {
                note: Some("Profile not found"),
                ..ok
            },
            ActivityOutcome::NotTracked { active_days } => LogActivityResponse {
                active_days: Some(active_days),
                ..ok
            },
            ActivityOutcome::AlreadyLogged {
                active_days,
                trial_eligible,
            } => LogActivityResponse {
                already_logged: Some(true),
                active_days: Some(active_days),
                trial_eligible: Some(trial_eligible),
                ..ok
            },
            ActivityOutcome::Logged {
                active_days,
                trial_eligible,
            } => LogActivityResponse {
                active_days: Some(active_days),
                trial_eligible: Some(trial_eligible),
                ..ok
            },
        }
    }
}
