//! Payment gateway trait, provider objects and error types.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while talking to the payments provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payments provider is not configured")]
    NotConfigured,

    #[error("Payments transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Payments provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid webhook signature: {0}")]
    InvalidSignature(String),

    #[error("Could not decode provider payload: {0}")]
    Decode(String),
}

/// Result type for payment operations.
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Parameters for a subscription checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub plan: String,
    pub user_id: String,
    pub customer_email: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
}

/// A Checkout Session as returned by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub client_reference_id: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    /// True once the customer has paid or the session has completed.
    pub fn is_paid(&self) -> bool {
        self.payment_status.as_deref() == Some("paid") || self.status.as_deref() == Some("complete")
    }

    /// User id attached at checkout time, from the reference id or metadata.
    pub fn user_id(&self) -> Option<&str> {
        self.client_reference_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.metadata.get("userId").map(String::as_str))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Price {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionItem {
    #[serde(default)]
    pub price: Option<Price>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemList {
    #[serde(default)]
    pub data: Vec<SubscriptionItem>,
}

/// A subscription object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Subscription {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub customer: Option<String>,
    /// Unix timestamp of the trial end, if trialing.
    #[serde(default)]
    pub trial_end: Option<i64>,
    #[serde(default)]
    pub items: ItemList,
}

impl Subscription {
    /// Price id of the first subscription item.
    pub fn price_id(&self) -> Option<&str> {
        self.items
            .data
            .first()
            .and_then(|item| item.price.as_ref())
            .map(|price| price.id.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortalSession {
    pub url: String,
}

/// A verified webhook event. `data.object` is kept raw and decoded per event type.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    pub object: serde_json::Value,
}

impl WebhookEvent {
    /// Decodes `data.object` into a concrete provider object.
    pub fn object<T: serde::de::DeserializeOwned>(&self) -> PaymentResult<T> {
        serde_json::from_value(self.data.object.clone())
            .map_err(|e| PaymentError::Decode(e.to_string()))
    }
}

/// Trait over the payments provider REST API.
///
/// # Implementations
///
/// - [`crate::infrastructure::payments::StripeClient`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a subscription-mode checkout session.
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> PaymentResult<CheckoutSession>;

    async fn retrieve_checkout_session(&self, session_id: &str) -> PaymentResult<CheckoutSession>;

    async fn retrieve_subscription(&self, subscription_id: &str) -> PaymentResult<Subscription>;

    /// Lists subscriptions of a customer in the given status (`active`, `trialing`, ...).
    async fn list_subscriptions(
        &self,
        customer_id: &str,
        status: &str,
        limit: u32,
    ) -> PaymentResult<Vec<Subscription>>;

    async fn find_customers_by_email(
        &self,
        email: &str,
        limit: u32,
    ) -> PaymentResult<Vec<Customer>>;

    /// Creates a billing-portal session for self-service subscription management.
    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> PaymentResult<PortalSession>;

    /// Verifies a webhook payload against its signature header and decodes it.
    fn construct_event(&self, payload: &[u8], signature_header: &str)
    -> PaymentResult<WebhookEvent>;
}
