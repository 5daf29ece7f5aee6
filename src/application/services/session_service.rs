//! Login session logging, suspicious-activity detection and free-plan activity days.

use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use super::email_service::EmailService;
use super::email_templates::EmailData;
use crate::domain::entities::{
    ActiveDayOutcome, EmailType, NewActivityFlag, NewUserSession, Plan,
    session::MULTI_IP_THRESHOLD,
};
use crate::domain::repositories::{ActivityFlagRepository, ProfileRepository, SessionRepository};
use crate::error::AppError;
use crate::utils::text::{email_local_part, truncate_chars};

const USER_AGENT_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct LoginEvent {
    pub user_id: String,
    pub email: String,
    pub user_agent: Option<String>,
    pub ip_address: String,
    pub is_new_user: bool,
}

/// Result of recording today's activity.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityOutcome {
    ProfileNotFound,
    /// Paid plans are not tracked.
    NotTracked { active_days: i32 },
    AlreadyLogged { active_days: i32, trial_eligible: bool },
    Logged { active_days: i32, trial_eligible: bool },
}

pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    flags: Arc<dyn ActivityFlagRepository>,
    profiles: Arc<dyn ProfileRepository>,
    email: Arc<EmailService>,
}

impl SessionService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        flags: Arc<dyn ActivityFlagRepository>,
        profiles: Arc<dyn ProfileRepository>,
        email: Arc<EmailService>,
    ) -> Self {
        Self {
            sessions,
            flags,
            profiles,
            email,
        }
    }

    /// Records a login. Every step is independent; failures are logged and swallowed.
    pub async fn record_login(&self, event: LoginEvent) {
        let session = NewUserSession {
            user_id: event.user_id.clone(),
            email: event.email.clone(),
            ip_address: event.ip_address.clone(),
            user_agent: truncate_chars(event.user_agent.as_deref().unwrap_or_default(), USER_AGENT_MAX_CHARS)
                .to_string(),
        };
        if let Err(e) = self.sessions.insert(session).await {
            warn!(user_id = %event.user_id, error = %e, "Failed to log session");
        }

        if event.is_new_user {
            self.email.notify(
                event.user_id.clone(),
                event.email.clone(),
                EmailType::Welcome,
                EmailData {
                    user_name: Some(email_local_part(&event.email).to_string()),
                    ..Default::default()
                },
            );
        }

        if let Err(e) = self.check_multi_ip(&event.user_id, &event.email).await {
            warn!(user_id = %event.user_id, error = %e, "Multi-IP check failed");
        }
    }

    async fn check_multi_ip(&self, user_id: &str, email: &str) -> Result<(), AppError> {
        let since = Utc::now() - Duration::hours(24);
        let ips = self.sessions.distinct_ips_since(user_id, since).await?;

        if ips.len() >= MULTI_IP_THRESHOLD {
            info!(user_id, unique_ips = ips.len(), "Flagging multi-IP activity");
            self.flags
                .insert(NewActivityFlag::multi_ip(user_id, email, &ips))
                .await?;
        }

        Ok(())
    }

    /// Logs today as an active day for free-plan users.
    pub async fn log_activity(&self, user_id: &str) -> Result<ActivityOutcome, AppError> {
        let Some(profile) = self.profiles.find_by_id(user_id).await.map_err(activity_failed)? else {
            return Ok(ActivityOutcome::ProfileNotFound);
        };

        if profile.plan() != Plan::Free {
            return Ok(ActivityOutcome::NotTracked {
                active_days: profile.active_days_count,
            });
        }

        let today = Utc::now().format("%Y-%m-%d").to_string();
        match profile.record_active_day(&today) {
            ActiveDayOutcome::AlreadyLogged {
                active_days,
                trial_eligible,
            } => Ok(ActivityOutcome::AlreadyLogged {
                active_days,
                trial_eligible,
            }),
            ActiveDayOutcome::Logged {
                days,
                active_days,
                trial_eligible,
            } => {
                self.profiles
                    .update_active_days(user_id, days, active_days, trial_eligible)
                    .await
                    .map_err(activity_failed)?;
                Ok(ActivityOutcome::Logged {
                    active_days,
                    trial_eligible,
                })
            }
        }
    }
}

fn activity_failed(e: AppError) -> AppError {
    warn!(error = %e, "Activity logging failed");
    AppError::internal("Activity logging failed", json!({ "reason": e.to_string() }))
}
