//! Payment webhook processing.

use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::billing_service::PriceCatalog;
use super::email_service::EmailService;
use super::email_templates::EmailData;
use crate::domain::entities::{EmailType, Plan};
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;
use crate::infrastructure::payments::{CheckoutSession, PaymentGateway, Subscription, WebhookEvent};

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";
pub const SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";

/// Applies verified provider events to user plans.
pub struct WebhookService {
    payments: Arc<dyn PaymentGateway>,
    profiles: Arc<dyn ProfileRepository>,
    prices: PriceCatalog,
    email: Arc<EmailService>,
}

impl WebhookService {
    pub fn new(
        payments: Arc<dyn PaymentGateway>,
        profiles: Arc<dyn ProfileRepository>,
        prices: PriceCatalog,
        email: Arc<EmailService>,
    ) -> Self {
        Self {
            payments,
            profiles,
            prices,
            email,
        }
    }

    /// Verifies `payload` against its signature header and applies the event.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] when the signature is missing or invalid, or a completed
    ///   checkout carries no user id
    /// - [`AppError::Internal`] when the plan update fails
    pub async fn handle(&self, payload: &[u8], signature: Option<&str>) -> Result<(), AppError> {
        let signature = signature.filter(|s| !s.is_empty()).ok_or_else(|| {
            AppError::bad_request(
                "Webhook signature verification failed",
                json!({ "reason": "missing Stripe-Signature header" }),
            )
        })?;

        let event = self.payments.construct_event(payload, signature).map_err(|e| {
            warn!(error = %e, "Webhook signature verification failed");
            AppError::from(e)
        })?;

        info!(event_id = %event.id, event_type = %event.event_type, "Webhook received");

        match event.event_type.as_str() {
            CHECKOUT_COMPLETED => self.checkout_completed(&event).await,
            SUBSCRIPTION_DELETED => self.subscription_deleted(&event).await,
            _ => Ok(()),
        }
    }

    async fn checkout_completed(&self, event: &WebhookEvent) -> Result<(), AppError> {
        let session: CheckoutSession = event.object()?;
        let user_id = session.user_id().map(str::to_string).ok_or_else(|| {
            error!(event_id = %event.id, "No userId found in session");
            AppError::bad_request("No userId in session", json!({ "event_id": event.id }))
        })?;

        let mut plan = Plan::Pro;
        if let Some(subscription_id) = session.subscription.as_deref() {
            match self.payments.retrieve_subscription(subscription_id).await {
                Ok(subscription) => {
                    if let Some(paid) = self.prices.plan_of(&subscription) {
                        plan = paid;
                    }
                }
                Err(e) => warn!(subscription_id, error = %e, "Error retrieving subscription"),
            }
        }

        let profile = self
            .profiles
            .activate_subscription(&user_id, plan, session.customer.clone())
            .await
            .map_err(|e| {
                error!(%user_id, error = %e, "Failed to update user plan");
                AppError::internal("Failed to update user plan", json!({ "userId": user_id }))
            })?;

        info!(%user_id, %plan, "Updated user plan");

        let email = profile
            .and_then(|p| p.email)
            .or(session.customer_email)
            .filter(|e| !e.is_empty());
        if let Some(email) = email {
            self.email.notify(
                user_id,
                email,
                EmailType::PaymentReceipt,
                EmailData {
                    plan_name: Some(plan.label().to_string()),
                    amount: Some(plan.monthly_price().to_string()),
                    ..Default::default()
                },
            );
        }

        Ok(())
    }

    async fn subscription_deleted(&self, event: &WebhookEvent) -> Result<(), AppError> {
        let subscription: Subscription = event.object()?;
        let Some(customer_id) = subscription.customer.filter(|c| !c.is_empty()) else {
            warn!(event_id = %event.id, "Cancelled subscription has no customer");
            return Ok(());
        };

        let profiles = self
            .profiles
            .downgrade_customer(&customer_id)
            .await
            .map_err(|e| {
                error!(%customer_id, error = %e, "Failed to downgrade user plan");
                AppError::internal(
                    "Failed to downgrade user plan",
                    json!({ "customer": customer_id }),
                )
            })?;

        info!(%customer_id, users = profiles.len(), "Downgraded customer to free plan");

        for profile in profiles {
            if let Some(email) = profile.email.filter(|e| !e.is_empty()) {
                self.email.notify(
                    profile.id,
                    email,
                    EmailType::SubscriptionCancelled,
                    EmailData::default(),
                );
            }
        }

        Ok(())
    }
}
