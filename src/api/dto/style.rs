//! DTOs for style extraction.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::StyleFingerprint;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtractStyleRequest {
    #[validate(
        required(message = "Missing userId, html, or documentType"),
        length(min = 1, message = "Missing userId, html, or documentType")
    )]
    pub user_id: Option<String>,

    #[validate(
        required(message = "Missing userId, html, or documentType"),
        length(min = 1, message = "Missing userId, html, or documentType")
    )]
    pub html: Option<String>,

    #[validate(
        required(message = "Missing userId, html, or documentType"),
        length(min = 1, message = "Missing userId, html, or documentType")
    )]
    pub document_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractStyleResponse {
    pub success: bool,
    pub fingerprint: StyleFingerprint,
}
