//! DTOs for the admin API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::admin_service::{AdminStats, UserDetail};
use crate::domain::entities::{ActivityFlag, DocumentRecord, ProfileSummary, UserActivitySummary};

/// Query string of `/api/admin-api`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminQuery {
    pub action: Option<String>,

    /// RFC 3339 lower bound for `live-feed`.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,

    pub user_id: Option<String>,
}

/// Optional JSON body; its values fill in what the query string lacks.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBody {
    pub action: Option<String>,
    pub user_id: Option<String>,
    pub flag_id: Option<String>,
}

/// Per-action response payloads.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AdminResponse {
    Stats(AdminStats),
    LiveFeed { docs: Vec<DocumentRecord> },
    UserDetail(UserDetail),
    Users { users: Vec<UserActivitySummary> },
    Flags { flags: Vec<ActivityFlag> },
    ResolvedFlag { flag: ActivityFlag },
    Profiles { profiles: Vec<ProfileSummary> },
    Clicks { clicks: Vec<Value> },
}
