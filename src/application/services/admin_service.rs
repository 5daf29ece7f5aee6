//! Read/query operations behind the admin dashboard.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::entities::{
    ActivityFlag, DocumentRecord, ProfileSummary, UserActivitySummary, UserSession,
};
use crate::domain::repositories::{
    ActivityFlagRepository, DocumentRepository, ProfileRepository, SessionRepository,
};
use crate::error::AppError;

const LIVE_FEED_LIMIT: i64 = 50;
const USER_DOCUMENTS_LIMIT: i64 = 50;
const USER_SESSIONS_LIMIT: i64 = 20;
const URL_CLICKS_LIMIT: i64 = 50;

/// Operations selectable through the `action` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Stats,
    LiveFeed,
    Users,
    Flags,
    ResolveFlag,
    AllProfiles,
    UrlClicks,
}

impl AdminAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::Stats => "stats",
            AdminAction::LiveFeed => "live-feed",
            AdminAction::Users => "users",
            AdminAction::Flags => "flags",
            AdminAction::ResolveFlag => "resolve-flag",
            AdminAction::AllProfiles => "all-profiles",
            AdminAction::UrlClicks => "url_clicks",
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stats" => Ok(AdminAction::Stats),
            "live-feed" => Ok(AdminAction::LiveFeed),
            "users" => Ok(AdminAction::Users),
            "flags" => Ok(AdminAction::Flags),
            "resolve-flag" => Ok(AdminAction::ResolveFlag),
            "all-profiles" => Ok(AdminAction::AllProfiles),
            "url_clicks" => Ok(AdminAction::UrlClicks),
            other => Err(AppError::bad_request(
                format!("Unknown action: {other}"),
                json!({ "action": other }),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub docs_today: i64,
    pub docs_30d: i64,
    pub active_users_today: i64,
    pub unresolved_flags: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    pub documents: Vec<DocumentRecord>,
    pub sessions: Vec<UserSession>,
    pub flags: Vec<ActivityFlag>,
}

pub struct AdminService {
    profiles: Arc<dyn ProfileRepository>,
    documents: Arc<dyn DocumentRepository>,
    sessions: Arc<dyn SessionRepository>,
    flags: Arc<dyn ActivityFlagRepository>,
}

/// Midnight UTC of the day containing `now`.
fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

impl AdminService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        documents: Arc<dyn DocumentRepository>,
        sessions: Arc<dyn SessionRepository>,
        flags: Arc<dyn ActivityFlagRepository>,
    ) -> Self {
        Self {
            profiles,
            documents,
            sessions,
            flags,
        }
    }

    /// Dashboard counters. The four counts run concurrently.
    pub async fn stats(&self) -> Result<AdminStats, AppError> {
        let now = Utc::now();
        let today = start_of_day(now);
        let thirty_days_ago = now - Duration::days(30);

        let (docs_today, docs_30d, active_users_today, unresolved_flags) = tokio::try_join!(
            self.documents.count_since(today),
            self.documents.count_since(thirty_days_ago),
            self.sessions.count_active_since(today),
            self.flags.count_unresolved(),
        )?;

        Ok(AdminStats {
            docs_today,
            docs_30d,
            active_users_today,
            unresolved_flags,
        })
    }

    /// Newest documents since `since` (default: the last 24 hours).
    pub async fn live_feed(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<DocumentRecord>, AppError> {
        let since = since.unwrap_or_else(|| Utc::now() - Duration::hours(24));
        self.documents.list_since(since, LIVE_FEED_LIMIT).await
    }

    pub async fn user_detail(&self, user_id: &str) -> Result<UserDetail, AppError> {
        let (documents, sessions, flags) = tokio::try_join!(
            self.documents.list_for_user(user_id, USER_DOCUMENTS_LIMIT),
            self.sessions.list_for_user(user_id, USER_SESSIONS_LIMIT),
            self.flags.list_for_user(user_id),
        )?;

        Ok(UserDetail {
            documents,
            sessions,
            flags,
        })
    }

    pub async fn users(&self) -> Result<Vec<UserActivitySummary>, AppError> {
        self.sessions.activity_summary().await
    }

    pub async fn unresolved_flags(&self) -> Result<Vec<ActivityFlag>, AppError> {
        self.flags.list_unresolved().await
    }

    /// Marks a flag resolved by `admin_email`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no flag has this id.
    pub async fn resolve_flag(
        &self,
        flag_id: &str,
        admin_email: &str,
    ) -> Result<ActivityFlag, AppError> {
        self.flags
            .resolve(flag_id, admin_email)
            .await?
            .ok_or_else(|| AppError::not_found("Flag not found", json!({ "flagId": flag_id })))
    }

    pub async fn all_profiles(&self) -> Result<Vec<ProfileSummary>, AppError> {
        self.profiles.list_summaries().await
    }

    pub async fn url_clicks(&self) -> Result<Vec<Value>, AppError> {
        self.sessions
            .url_click_summary(URL_CLICKS_LIMIT)
            .await
            .map_err(|e| {
                AppError::internal(
                    "Failed to fetch click data",
                    json!({ "reason": e.to_string() }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockActivityFlagRepository, MockDocumentRepository, MockProfileRepository,
        MockSessionRepository,
    };
    use chrono::{TimeZone, Timelike};

    fn service(
        documents: MockDocumentRepository,
        sessions: MockSessionRepository,
        flags: MockActivityFlagRepository,
    ) -> AdminService {
        AdminService::new(
            Arc::new(MockProfileRepository::new()),
            Arc::new(documents),
            Arc::new(sessions),
            Arc::new(flags),
        )
    }

    #[test]
    fn test_parse_actions() {
        for action in [
            AdminAction::Stats,
            AdminAction::LiveFeed,
            AdminAction::Users,
            AdminAction::Flags,
            AdminAction::ResolveFlag,
            AdminAction::AllProfiles,
            AdminAction::UrlClicks,
        ] {
            assert_eq!(action.as_str().parse::<AdminAction>().unwrap(), action);
        }

        match "drop-tables".parse::<AdminAction>() {
            Err(AppError::Validation { message, .. }) => {
                assert_eq!(message, "Unknown action: drop-tables")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_start_of_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 17, 45, 3).unwrap();
        let midnight = start_of_day(now);
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.date_naive(), now.date_naive());
    }

    #[tokio::test]
    async fn test_stats_collects_counts() {
        let mut documents = MockDocumentRepository::new();
        let mut sessions = MockSessionRepository::new();
        let mut flags = MockActivityFlagRepository::new();

        let today = start_of_day(Utc::now());
        documents
            .expect_count_since()
            .withf(move |since| *since == today)
            .returning(|_| Ok(3));
        documents
            .expect_count_since()
            .withf(move |since| *since != today)
            .returning(|_| Ok(42));
        sessions.expect_count_active_since().returning(|_| Ok(7));
        flags.expect_count_unresolved().returning(|| Ok(1));

        let stats = service(documents, sessions, flags).stats().await.unwrap();

        assert_eq!(
            stats,
            AdminStats {
                docs_today: 3,
                docs_30d: 42,
                active_users_today: 7,
                unresolved_flags: 1
            }
        );
    }

    #[tokio::test]
    async fn test_live_feed_defaults_to_last_day() {
        let mut documents = MockDocumentRepository::new();
        documents
            .expect_list_since()
            .withf(|since, limit| {
                let age = Utc::now() - *since;
                *limit == 50 && age >= Duration::hours(23) && age <= Duration::hours(25)
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let docs = service(
            documents,
            MockSessionRepository::new(),
            MockActivityFlagRepository::new(),
        )
        .live_feed(None)
        .await
        .unwrap();

        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_missing_flag_is_not_found() {
        let mut flags = MockActivityFlagRepository::new();
        flags
            .expect_resolve()
            .withf(|id, by| id == "flag-1" && by == "admin@draftmyforms.com")
            .returning(|_, _| Ok(None));

        let err = service(
            MockDocumentRepository::new(),
            MockSessionRepository::new(),
            flags,
        )
        .resolve_flag("flag-1", "admin@draftmyforms.com")
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
