//! Subscription plans and their limits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A subscription tier. Also used as the access tier of catalog templates.
///
/// Ordering follows rank: `Free < Pro < Business`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Business,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Free, Plan::Pro, Plan::Business];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::Business => "business",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Plan::Free => 0,
            Plan::Pro => 1,
            Plan::Business => 2,
        }
    }

    /// Generations allowed per calendar month.
    pub fn monthly_credits(&self) -> i32 {
        match self {
            Plan::Free => 5,
            Plan::Pro => 100,
            Plan::Business => 500,
        }
    }

    /// Display name used in emails.
    pub fn label(&self) -> &'static str {
        match self {
            Plan::Free => "Free",
            Plan::Pro => "Pro",
            Plan::Business => "Business",
        }
    }

    /// Monthly price in USD, formatted for receipts.
    pub fn monthly_price(&self) -> &'static str {
        match self {
            Plan::Free => "0.00",
            Plan::Pro => "9.99",
            Plan::Business => "24.99",
        }
    }

    /// Parses a stored plan string. Unknown or empty values count as [`Plan::Free`].
    pub fn from_stored(value: &str) -> Plan {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan: {0}")]
pub struct UnknownPlan(pub String);

impl FromStr for Plan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "pro" => Ok(Plan::Pro),
            "business" => Ok(Plan::Business),
            other => Err(UnknownPlan(other.to_string())),
        }
    }
}
