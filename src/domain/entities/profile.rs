//! User profile and the credit/activity rules attached to it.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::plan::Plan;

/// Free-plan users stay trial eligible until they have been active on this many days.
pub const TRIAL_ACTIVE_DAYS: i32 = 3;

/// A row of `profiles`.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Profile {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub plan: String,
    pub role: Option<String>,
    pub stripe_customer_id: Option<String>,
    pub credits_used: i32,
    pub credits_reset_at: Option<DateTime<Utc>>,
    pub active_days_log: Vec<String>,
    pub active_days_count: i32,
    pub trial_eligible: bool,
}

impl Profile {
    pub fn plan(&self) -> Plan {
        Plan::from_stored(&self.plan)
    }

    /// Credit usage as of `now`, applying the monthly reset.
    pub fn credit_usage(&self, now: DateTime<Utc>) -> CreditUsage {
        let used = if same_month(self.credits_reset_at, now) {
            self.credits_used.max(0)
        } else {
            0
        };

        CreditUsage {
            used,
            limit: self.plan().monthly_credits(),
        }
    }

    /// Applies today's activity to the free-plan activity log.
    ///
    /// `today` is a `YYYY-MM-DD` date.
    pub fn record_active_day(&self, today: &str) -> ActiveDayOutcome {
        if self.active_days_log.iter().any(|d| d == today) {
            let count = self.active_days_log.len() as i32;
            return ActiveDayOutcome::AlreadyLogged {
                active_days: count,
                trial_eligible: count < TRIAL_ACTIVE_DAYS,
            };
        }

        let mut days = self.active_days_log.clone();
        days.push(today.to_string());
        let count = days.len() as i32;

        ActiveDayOutcome::Logged {
            days,
            active_days: count,
            trial_eligible: count < TRIAL_ACTIVE_DAYS,
        }
    }
}

fn same_month(stamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    stamp.is_some_and(|s| s.year() == now.year() && s.month() == now.month())
}

/// Credits consumed in the current month against the plan limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditUsage {
    pub used: i32,
    pub limit: i32,
}

impl CreditUsage {
    pub fn remaining(&self) -> i32 {
        (self.limit - self.used).max(0)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }

    /// Usage after one more generation.
    pub fn consume_one(self) -> CreditUsage {
        CreditUsage {
            used: self.used + 1,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveDayOutcome {
    AlreadyLogged {
        active_days: i32,
        trial_eligible: bool,
    },
    Logged {
        days: Vec<String>,
        active_days: i32,
        trial_eligible: bool,
    },
}

/// Columns exposed by the admin profile listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProfileSummary {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub plan: String,
    pub role: Option<String>,
    pub stripe_customer_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
