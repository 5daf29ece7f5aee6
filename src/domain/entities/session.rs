//! Login sessions and suspicious-activity flags.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

/// Distinct IPs within a day at which a user is flagged.
pub const MULTI_IP_THRESHOLD: usize = 4;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserSession {
    pub id: String,
    pub user_id: String,
    pub email: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub logged_in_at: DateTime<Utc>,
    pub last_active_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUserSession {
    pub user_id: String,
    pub email: String,
    pub ip_address: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityFlag {
    pub id: String,
    pub user_id: String,
    pub email: Option<String>,
    pub flag_type: String,
    pub severity: String,
    pub details: Value,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActivityFlag {
    pub user_id: String,
    pub email: String,
    pub flag_type: String,
    pub severity: String,
    pub details: Value,
}

impl NewActivityFlag {
    /// Flag for logins from too many addresses. At most ten addresses are kept.
    pub fn multi_ip(user_id: &str, email: &str, ips: &[String]) -> Self {
        let sample: Vec<&String> = ips.iter().take(10).collect();
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            flag_type: "multi_ip".to_string(),
            severity: "medium".to_string(),
            details: json!({ "unique_ips": ips.len(), "ips": sample }),
        }
    }
}

/// Per-user activity rollup for the admin user list.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserActivitySummary {
    pub user_id: String,
    pub email: Option<String>,
    pub plan: Option<String>,
    pub documents: i64,
    pub sessions: i64,
    pub open_flags: i64,
    pub last_active_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_ip_flag_caps_sample() {
        let ips: Vec<String> = (0..12).map(|i| format!("10.0.0.{i}")).collect();
        let flag = NewActivityFlag::multi_ip("user-1", "a@b.co", &ips);

        assert_eq!(flag.flag_type, "multi_ip");
        assert_eq!(flag.severity, "medium");
        assert_eq!(flag.details["unique_ips"], 12);
        assert_eq!(flag.details["ips"].as_array().unwrap().len(), 10);
    }
}
