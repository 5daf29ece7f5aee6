//! Stripe REST API client.

use super::service::{
    CheckoutRequest, CheckoutSession, Customer, PaymentError, PaymentGateway, PaymentResult,
    PortalSession, Subscription, WebhookEvent,
};
use super::signature;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Payments client for Stripe.
///
/// Requests are form-encoded as the API expects; responses are decoded with serde.
pub struct StripeClient {
    http: reqwest::Client,
    api_url: String,
    secret_key: Option<String>,
    webhook_secret: Option<String>,
}

#[derive(Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl StripeClient {
    pub fn new(
        http: reqwest::Client,
        api_url: impl Into<String>,
        secret_key: Option<String>,
        webhook_secret: Option<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            secret_key,
            webhook_secret,
        }
    }

    fn key(&self) -> PaymentResult<&str> {
        self.secret_key.as_deref().ok_or(PaymentError::NotConfigured)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> PaymentResult<T> {
        let response = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(self.key()?)
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> PaymentResult<T> {
        let response = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .bearer_auth(self.key()?)
            .form(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> PaymentResult<T> {
        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(raw);
            warn!(status = status.as_u16(), %message, "Stripe request failed");
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PaymentError::Decode(e.to_string()))
    }
}

/// Flattens a checkout request into Stripe's bracketed form keys.
fn checkout_form(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_string(), "subscription".to_string()),
        ("payment_method_types[0]".to_string(), "card".to_string()),
        ("line_items[0][price]".to_string(), request.price_id.clone()),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
        (
            "client_reference_id".to_string(),
            request.user_id.clone(),
        ),
        ("metadata[userId]".to_string(), request.user_id.clone()),
        ("metadata[plan]".to_string(), request.plan.clone()),
    ];

    if let Some(email) = request.customer_email.as_ref().filter(|e| !e.is_empty()) {
        form.push(("customer_email".to_string(), email.clone()));
    }

    form
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> PaymentResult<CheckoutSession> {
        let session: CheckoutSession = self
            .post("/v1/checkout/sessions", &checkout_form(&request))
            .await?;
        debug!(session_id = %session.id, plan = %request.plan, "Checkout session created");
        Ok(session)
    }

    async fn retrieve_checkout_session(&self, session_id: &str) -> PaymentResult<CheckoutSession> {
        self.get(&format!("/v1/checkout/sessions/{session_id}"), &[])
            .await
    }

    async fn retrieve_subscription(&self, subscription_id: &str) -> PaymentResult<Subscription> {
        self.get(&format!("/v1/subscriptions/{subscription_id}"), &[])
            .await
    }

    async fn list_subscriptions(
        &self,
        customer_id: &str,
        status: &str,
        limit: u32,
    ) -> PaymentResult<Vec<Subscription>> {
        let list: ListResponse<Subscription> = self
            .get(
                "/v1/subscriptions",
                &[
                    ("customer", customer_id.to_string()),
                    ("status", status.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(list.data)
    }

    async fn find_customers_by_email(
        &self,
        email: &str,
        limit: u32,
    ) -> PaymentResult<Vec<Customer>> {
        let list: ListResponse<Customer> = self
            .get(
                "/v1/customers",
                &[("email", email.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        Ok(list.data)
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> PaymentResult<PortalSession> {
        self.post(
            "/v1/billing_portal/sessions",
            &[
                ("customer".to_string(), customer_id.to_string()),
                ("return_url".to_string(), return_url.to_string()),
            ],
        )
        .await
    }

    fn construct_event(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> PaymentResult<WebhookEvent> {
        let secret = self.webhook_secret.as_deref().unwrap_or_default();
        signature::verify(
            payload,
            signature_header,
            secret,
            chrono::Utc::now().timestamp(),
            signature::DEFAULT_TOLERANCE_SECS,
        )?;

        serde_json::from_slice(payload).map_err(|e| PaymentError::Decode(e.to_string()))
    }
}
