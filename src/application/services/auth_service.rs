//! Access checks for admin and scheduled-job endpoints.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tracing::warn;

use crate::error::AppError;
use crate::infrastructure::identity::{AuthUser, IdentityProvider};
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Secrets and allowlists used to authorize privileged requests.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    /// Lower-cased admin email addresses.
    pub admin_emails: Vec<String>,
    pub admin_secret_key: Option<String>,
    pub cron_secret: Option<String>,
}

/// Service for authorizing admins (identity token + allowlist), admin keys and cron callers.
pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    policy: AccessPolicy,
}

/// MAC of a fixed message keyed by the secret; equal secrets yield equal tags.
fn secret_tag(secret: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(b"draftmyforms-access-check");
    mac
}

/// Compares two secrets in constant time.
fn secrets_match(expected: &str, provided: &str) -> bool {
    let expected_tag = secret_tag(expected).finalize().into_bytes();
    secret_tag(provided).verify_slice(&expected_tag).is_ok()
}

impl AuthService {
    pub fn new(identity: Arc<dyn IdentityProvider>, mut policy: AccessPolicy) -> Self {
        policy.admin_emails = policy
            .admin_emails
            .iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { identity, policy }
    }

    /// Resolves an access token and checks the user against the admin allowlist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the token is invalid or the user is not an
    /// admin.
    pub async fn authenticate_admin(&self, token: &str) -> Result<AuthUser, AppError> {
        let user = self.identity.user_for_token(token).await.map_err(|e| {
            warn!(error = %e, "Admin token rejected");
            AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid token" }))
        })?;

        let is_admin = user
            .email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .is_some_and(|e| self.policy.admin_emails.contains(&e));

        if !is_admin {
            warn!(user_id = %user.id, "Non-admin user attempted admin access");
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Not an admin" }),
            ));
        }

        Ok(user)
    }

    /// True when `key` equals the configured admin secret key.
    pub fn is_admin_key(&self, key: &str) -> bool {
        self.policy
            .admin_secret_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .is_some_and(|expected| secrets_match(expected, key))
    }

    /// Checks a scheduled-job bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when no secret is configured or it does not match.
    pub fn authenticate_cron(&self, token: Option<&str>) -> Result<(), AppError> {
        let valid = match (self.policy.cron_secret.as_deref(), token) {
            (Some(expected), Some(token)) if !expected.is_empty() => {
                secrets_match(expected, token)
            }
            _ => false,
        };

        if valid {
            Ok(())
        } else {
            Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or missing cron secret" }),
            ))
        }
    }
}
