//! Payments provider integration.
//!
//! - [`PaymentGateway`] - trait over the provider's REST API
//! - [`StripeClient`] - Stripe implementation (form-encoded requests)
//! - [`signature`] - webhook signature verification

mod service;
pub mod signature;
mod stripe;

pub use service::{
    CheckoutRequest, CheckoutSession, Customer, PaymentError, PaymentGateway, PaymentResult,
    PortalSession, Subscription, SubscriptionItem, WebhookEvent,
};
pub use stripe::StripeClient;

#[cfg(test)]
pub use service::MockPaymentGateway;
