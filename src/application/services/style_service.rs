//! Style fingerprint extraction.

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::StyleFingerprint;
use crate::domain::prompts::{STYLE_EXTRACTION_PROMPT, STYLE_MAX_TOKENS, style_user_message};
use crate::domain::repositories::StyleRepository;
use crate::error::AppError;
use crate::infrastructure::llm::{CompletionRequest, LlmClient};
use crate::utils::html::strip_code_fences;

/// Asks the LLM for a document's design traits and stores them per user and document type.
pub struct StyleService {
    llm: Arc<dyn LlmClient>,
    styles: Arc<dyn StyleRepository>,
}

impl StyleService {
    pub fn new(llm: Arc<dyn LlmClient>, styles: Arc<dyn StyleRepository>) -> Self {
        Self { llm, styles }
    }

    /// Extracts and upserts the fingerprint of `html`.
    ///
    /// # Errors
    ///
    /// Every failure after the configuration check is reported as
    /// "Style extraction failed" with the cause in `details`.
    pub async fn extract(
        &self,
        user_id: &str,
        document_type: &str,
        html: &str,
    ) -> Result<StyleFingerprint, AppError> {
        if !self.llm.is_configured() {
            return Err(AppError::internal("AI service not configured", json!({})));
        }

        let fingerprint = self
            .fingerprint(document_type, html)
            .await
            .map_err(extraction_failed)?;

        self.styles
            .upsert(user_id, document_type, fingerprint.clone())
            .await
            .map_err(extraction_failed)?;

        debug!(user_id, document_type, "Style fingerprint stored");
        Ok(fingerprint)
    }

    /// Runs [`Self::extract`] in the background.
    pub fn extract_in_background(self: &Arc<Self>, user_id: String, document_type: String, html: String) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = service.extract(&user_id, &document_type, &html).await {
                warn!(%user_id, %document_type, error = %e, "Background style extraction failed");
            }
        });
    }

    async fn fingerprint(&self, document_type: &str, html: &str) -> Result<StyleFingerprint, String> {
        let completion = self
            .llm
            .complete(CompletionRequest {
                system: STYLE_EXTRACTION_PROMPT.to_string(),
                user_message: style_user_message(document_type, html),
                max_tokens: STYLE_MAX_TOKENS,
            })
            .await
            .map_err(|e| e.to_string())?;

        let text = strip_code_fences(&completion.text);
        serde_json::from_str(text.trim()).map_err(|e| format!("invalid fingerprint JSON: {e}"))
    }
}

fn extraction_failed(reason: impl ToString) -> AppError {
    let reason = reason.to_string();
    warn!(%reason, "Style extraction error");
    AppError::internal("Style extraction failed", json!({ "reason": reason }))
}
