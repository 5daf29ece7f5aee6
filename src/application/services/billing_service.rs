//! Subscription checkout, billing portal and subscription verification.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::Plan;
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;
use crate::infrastructure::payments::{CheckoutRequest, PaymentGateway, Subscription};

const NO_CUSTOMER_MESSAGE: &str = "No Stripe subscription found for this account. \
     If your plan was manually assigned, no subscription management is needed.";

/// Provider price ids of the paid plans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceCatalog {
    pub pro: Option<String>,
    pub business: Option<String>,
}

impl PriceCatalog {
    pub fn price_for(&self, plan: Plan) -> Option<&str> {
        match plan {
            Plan::Free => None,
            Plan::Pro => self.pro.as_deref(),
            Plan::Business => self.business.as_deref(),
        }
        .filter(|id| !id.is_empty())
    }

    pub fn plan_for(&self, price_id: &str) -> Option<Plan> {
        [Plan::Pro, Plan::Business]
            .into_iter()
            .find(|plan| self.price_for(*plan) == Some(price_id))
    }

    /// Plan of a subscription's first price, if that price is known.
    pub fn plan_of(&self, subscription: &Subscription) -> Option<Plan> {
        subscription.price_id().and_then(|id| self.plan_for(id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutLink {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub url: Option<String>,
}

/// Subscription state reported back to the client after checkout or on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStatus {
    pub plan: Plan,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<DateTime<Utc>>,
}

impl PlanStatus {
    fn new(plan: Plan, status: &str) -> Self {
        Self {
            plan,
            status: status.to_string(),
            trial_end: None,
        }
    }
}

pub struct BillingService {
    payments: Arc<dyn PaymentGateway>,
    profiles: Arc<dyn ProfileRepository>,
    prices: PriceCatalog,
}

impl BillingService {
    pub fn new(
        payments: Arc<dyn PaymentGateway>,
        profiles: Arc<dyn ProfileRepository>,
        prices: PriceCatalog,
    ) -> Self {
        Self {
            payments,
            profiles,
            prices,
        }
    }

    pub fn prices(&self) -> &PriceCatalog {
        &self.prices
    }

    /// Creates a subscription checkout for `plan`.
    ///
    /// `origin` is the site the customer returns to.
    pub async fn create_checkout(
        &self,
        plan: &str,
        user_id: &str,
        user_email: Option<String>,
        origin: &str,
    ) -> Result<CheckoutLink, AppError> {
        let price_id = plan
            .parse::<Plan>()
            .ok()
            .and_then(|p| self.prices.price_for(p))
            .ok_or_else(|| {
                AppError::bad_request(format!("Invalid plan: {plan}"), json!({ "plan": plan }))
            })?;

        let session = self
            .payments
            .create_checkout_session(CheckoutRequest {
                price_id: price_id.to_string(),
                plan: plan.to_string(),
                user_id: user_id.to_string(),
                customer_email: user_email,
                success_url: format!("{origin}/?payment=success"),
                cancel_url: format!("{origin}/?payment=cancelled"),
            })
            .await?;

        info!(user_id, plan, session_id = %session.id, "Checkout session created");
        Ok(CheckoutLink {
            session_id: session.id,
            url: session.url,
        })
    }

    /// Creates a billing-portal session and returns its URL.
    ///
    /// With a `user_id` the customer comes from the profile, falling back to a search by
    /// the profile email; a found customer is saved on the profile.
    pub async fn create_portal(
        &self,
        user_id: Option<&str>,
        customer_id: Option<String>,
        origin: &str,
    ) -> Result<String, AppError> {
        let mut customer_id = customer_id.filter(|c| !c.is_empty());
        let mut email = None;

        if let Some(user_id) = user_id {
            let profile = self.profiles.find_by_id(user_id).await?.ok_or_else(|| {
                AppError::not_found("User not found", json!({ "userId": user_id }))
            })?;
            customer_id = profile.stripe_customer_id.filter(|c| !c.is_empty());
            email = profile.email.filter(|e| !e.is_empty());
        }

        if customer_id.is_none()
            && let Some(email) = email
        {
            let customers = self.payments.find_customers_by_email(&email, 1).await?;
            if let Some(customer) = customers.into_iter().next() {
                if let Some(user_id) = user_id {
                    self.profiles.set_customer_id(user_id, &customer.id).await?;
                }
                customer_id = Some(customer.id);
            }
        }

        let customer_id = customer_id
            .ok_or_else(|| AppError::bad_request(NO_CUSTOMER_MESSAGE, json!({})))?;

        let portal = self
            .payments
            .create_portal_session(&customer_id, &format!("{origin}/dashboard.html"))
            .await?;

        Ok(portal.url)
    }

    /// Reconciles the stored plan with the provider.
    pub async fn verify(
        &self,
        user_id: &str,
        session_id: Option<&str>,
    ) -> Result<PlanStatus, AppError> {
        if let Some(session_id) = session_id.filter(|s| !s.is_empty()) {
            let session = self.payments.retrieve_checkout_session(session_id).await?;

            if session.is_paid() {
                let mut plan = session
                    .metadata
                    .get("plan")
                    .and_then(|p| p.parse::<Plan>().ok())
                    .unwrap_or(Plan::Pro);

                if let Some(subscription_id) = session.subscription.as_deref() {
                    let subscription = self.payments.retrieve_subscription(subscription_id).await?;
                    if let Some(paid) = self.prices.plan_of(&subscription) {
                        plan = paid;
                    }
                }

                self.profiles
                    .set_plan_and_customer(user_id, plan, session.customer.clone())
                    .await?;

                info!(user_id, %plan, "Plan activated from checkout session");
                return Ok(PlanStatus::new(plan, "active"));
            }
        }

        let profile = self.profiles.find_by_id(user_id).await?;
        let stored_plan = profile.as_ref().map(|p| p.plan()).unwrap_or_default();

        let Some(customer_id) = profile
            .as_ref()
            .and_then(|p| p.stripe_customer_id.as_deref())
            .filter(|c| !c.is_empty())
        else {
            return Ok(PlanStatus::new(stored_plan, "none"));
        };

        match self.current_subscription(customer_id).await? {
            Some(subscription) => {
                let plan = self.prices.plan_of(&subscription).unwrap_or(stored_plan);
                if plan != stored_plan {
                    self.profiles.set_plan(user_id, plan).await?;
                    info!(user_id, from = %stored_plan, to = %plan, "Plan synced from subscription");
                }

                Ok(PlanStatus {
                    plan,
                    status: subscription.status.clone(),
                    trial_end: subscription
                        .trial_end
                        .and_then(|ts| DateTime::from_timestamp(ts, 0)),
                })
            }
            None => {
                if stored_plan != Plan::Free {
                    self.profiles.set_plan(user_id, Plan::Free).await?;
                    warn!(user_id, from = %stored_plan, "No live subscription, downgraded to free");
                }
                Ok(PlanStatus::new(Plan::Free, "none"))
            }
        }
    }

    /// First `active` subscription, else first `trialing` one.
    async fn current_subscription(
        &self,
        customer_id: &str,
    ) -> Result<Option<Subscription>, AppError> {
        for status in ["active", "trialing"] {
            let subs = self
                .payments
                .list_subscriptions(customer_id, status, 1)
                .await?;
            if let Some(sub) = subs.into_iter().next() {
                return Ok(Some(sub));
            }
        }
        Ok(None)
    }
}
