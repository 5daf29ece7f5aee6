//! Transactional email types and their send cooldowns.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailType {
    Welcome,
    DocumentReady,
    CreditsLow,
    PaymentReceipt,
    SubscriptionCancelled,
    TrialEnding,
}

impl EmailType {
    pub const ALL: [EmailType; 6] = [
        EmailType::Welcome,
        EmailType::DocumentReady,
        EmailType::CreditsLow,
        EmailType::PaymentReceipt,
        EmailType::SubscriptionCancelled,
        EmailType::TrialEnding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailType::Welcome => "welcome",
            EmailType::DocumentReady => "document_ready",
            EmailType::CreditsLow => "credits_low",
            EmailType::PaymentReceipt => "payment_receipt",
            EmailType::SubscriptionCancelled => "subscription_cancelled",
            EmailType::TrialEnding => "trial_ending",
        }
    }

    /// Minimum time between two sends of this type to the same user.
    ///
    /// One-off messages use a cooldown long enough to never repeat.
    pub fn cooldown(&self) -> Duration {
        let minutes = match self {
            EmailType::Welcome => 999_999,
            EmailType::DocumentReady => 1,
            EmailType::CreditsLow => 1_440,
            EmailType::PaymentReceipt => 5,
            EmailType::SubscriptionCancelled => 999_999,
            EmailType::TrialEnding => 1_440,
        };
        Duration::minutes(minutes)
    }
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmailType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmailLog {
    pub user_id: String,
    pub email_type: EmailType,
    pub resend_id: Option<String>,
}
