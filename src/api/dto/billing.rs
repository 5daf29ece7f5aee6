//! DTOs for checkout, billing portal, session verification and webhooks.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    #[validate(
        required(message = "Missing plan or userId"),
        length(min = 1, message = "Missing plan or userId")
    )]
    pub plan: Option<String>,

    #[validate(
        required(message = "Missing plan or userId"),
        length(min = 1, message = "Missing plan or userId")
    )]
    pub user_id: Option<String>,

    pub user_email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortalRequest {
    pub user_id: Option<String>,
    pub customer_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub url: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifySessionRequest {
    #[validate(
        required(message = "Missing userId"),
        length(min = 1, message = "Missing userId")
    )]
    pub user_id: Option<String>,

    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}
