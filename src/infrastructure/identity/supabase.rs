use super::service::{AuthUser, IdentityError, IdentityProvider, IdentityResult};
use async_trait::async_trait;
use tracing::warn;

/// Looks tokens up through `GET {SUPABASE_URL}/auth/v1/user`.
pub struct SupabaseAuth {
    http: reqwest::Client,
    base_url: Option<String>,
    service_key: Option<String>,
}

impl SupabaseAuth {
    pub fn new(http: reqwest::Client, base_url: Option<String>, service_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
            service_key,
        }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn user_for_token(&self, access_token: &str) -> IdentityResult<AuthUser> {
        let (Some(base_url), Some(service_key)) = (&self.base_url, &self.service_key) else {
            return Err(IdentityError::NotConfigured);
        };

        if access_token.trim().is_empty() {
            return Err(IdentityError::InvalidToken);
        }

        let response = self
            .http
            .get(format!("{base_url}/auth/v1/user"))
            .header("apikey", service_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(IdentityError::InvalidToken);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %message, "Token lookup failed");
            return Err(IdentityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
