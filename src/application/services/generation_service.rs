//! AI document generation and editing, gated by monthly credits.

use chrono::{Duration, Utc};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::email_service::EmailService;
use super::email_templates::EmailData;
use super::style_service::StyleService;
use crate::domain::entities::{
    CreditUsage, EmailType, GenerationMode, GoldenSample, NewDocumentRecord, Plan,
    StyleFingerprint,
};
use crate::domain::prompts::{
    GENERATION_MAX_TOKENS, generation_system_prompt, generation_user_message,
};
use crate::domain::repositories::{
    DocumentRepository, ProfileRepository, StyleRepository, TrainingRepository,
};
use crate::error::AppError;
use crate::infrastructure::llm::{CompletionRequest, LlmClient};
use crate::utils::html::clean_generated_html;

/// A `credits_low` email goes out once remaining credits drop to this value.
pub const LOW_CREDITS_THRESHOLD: i32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub mode: GenerationMode,
    pub doc_type: Option<String>,
    pub user_id: String,
    pub current_html: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Counts as stored in the `integer` history columns, clamped at `i32::MAX`.
    fn stored(self) -> (i32, i32) {
        let clamp = |count: u32| i32::try_from(count).unwrap_or(i32::MAX);
        (clamp(self.input_tokens), clamp(self.output_tokens))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub html: String,
    pub mode: GenerationMode,
    pub usage: TokenUsage,
    pub credits: CreditUsage,
    pub plan: Plan,
}

/// Collaborators used after the response is decided; none of them can fail the request.
pub struct GenerationSideEffects {
    pub styles: Arc<StyleService>,
    pub email: Arc<EmailService>,
}

pub struct GenerationService {
    llm: Arc<dyn LlmClient>,
    profiles: Arc<dyn ProfileRepository>,
    documents: Arc<dyn DocumentRepository>,
    style_store: Arc<dyn StyleRepository>,
    training: Arc<dyn TrainingRepository>,
    side_effects: GenerationSideEffects,
    rate_limit_per_minute: i64,
}

impl GenerationService {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        profiles: Arc<dyn ProfileRepository>,
        documents: Arc<dyn DocumentRepository>,
        style_store: Arc<dyn StyleRepository>,
        training: Arc<dyn TrainingRepository>,
        side_effects: GenerationSideEffects,
        rate_limit_per_minute: i64,
    ) -> Self {
        Self {
            llm,
            profiles,
            documents,
            style_store,
            training,
            side_effects,
            rate_limit_per_minute,
        }
    }

    /// Generates or edits a document for a user with credits left.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an edit without current HTML
    /// - [`AppError::NotFound`] when the user has no profile
    /// - [`AppError::PaymentRequired`] when the monthly credits are used up
    /// - [`AppError::TooManyRequests`] when the per-minute limit is reached
    /// - [`AppError::Upstream`] when the LLM call fails
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome, AppError> {
        if request.mode == GenerationMode::Edit
            && request.current_html.as_deref().is_none_or(|h| h.trim().is_empty())
        {
            return Err(AppError::bad_request(
                "currentHtml is required for edit mode",
                json!({ "field": "currentHtml" }),
            ));
        }

        if !self.llm.is_configured() {
            return Err(AppError::internal("AI service not configured", json!({})));
        }

        let profile = self
            .profiles
            .find_by_id(&request.user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("User not found", json!({ "userId": request.user_id }))
            })?;

        let now = Utc::now();
        let plan = profile.plan();
        let credits = profile.credit_usage(now);
        if credits.is_exhausted() {
            return Err(AppError::payment_required(
                "Monthly credit limit reached. Upgrade your plan for more documents.",
                json!({ "plan": plan, "used": credits.used, "limit": credits.limit }),
            ));
        }

        self.check_rate_limit(&request.user_id).await?;

        let doc_type = request.doc_type.as_deref().filter(|d| !d.trim().is_empty());
        let (style, sample) = match doc_type {
            Some(doc_type) => self.generation_context(&request.user_id, doc_type).await,
            None => (None, None),
        };

        let completion = self
            .llm
            .complete(CompletionRequest {
                system: generation_system_prompt(style.as_ref(), sample.as_ref()),
                user_message: generation_user_message(
                    request.mode,
                    doc_type,
                    &request.prompt,
                    request.current_html.as_deref(),
                ),
                max_tokens: GENERATION_MAX_TOKENS,
            })
            .await
            .map_err(|e| {
                error!(user_id = %request.user_id, error = %e, "AI generation failed");
                AppError::upstream("Failed to generate document. Please try again.", e)
            })?;

        let html = clean_generated_html(&completion.text);
        let usage = TokenUsage {
            input_tokens: completion.input_tokens,
            output_tokens: completion.output_tokens,
        };

        let credits = credits.consume_one();
        if let Err(e) = self
            .profiles
            .set_credits_used(&request.user_id, credits.used, now)
            .await
        {
            warn!(user_id = %request.user_id, error = %e, "Failed to increment credits");
        }

        info!(
            user_id = %request.user_id,
            mode = %request.mode,
            doc_type = doc_type.unwrap_or("document"),
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            credits_used = credits.used,
            "Document generated"
        );

        self.spawn_side_effects(&request, &html, usage, credits, plan);

        Ok(GenerationOutcome {
            html,
            mode: request.mode,
            usage,
            credits,
            plan,
        })
    }

    /// Best-effort count of the user's generations in the last minute.
    async fn check_rate_limit(&self, user_id: &str) -> Result<(), AppError> {
        let since = Utc::now() - Duration::seconds(60);
        match self.documents.count_for_user_since(user_id, since).await {
            Ok(count) if count >= self.rate_limit_per_minute => Err(AppError::too_many_requests(
                "Too many requests. Please wait a moment and try again.",
                json!({ "limit_per_minute": self.rate_limit_per_minute }),
            )),
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(user_id, error = %e, "Rate limit check failed");
                Ok(())
            }
        }
    }

    /// Stored style and best golden sample for the document type. Lookup failures are ignored.
    async fn generation_context(
        &self,
        user_id: &str,
        doc_type: &str,
    ) -> (Option<StyleFingerprint>, Option<GoldenSample>) {
        let (style, sample) = tokio::join!(
            self.style_store.find(user_id, doc_type),
            self.training.best_golden_sample(doc_type)
        );

        let style = style
            .inspect_err(|e| debug!(user_id, doc_type, error = %e, "Style lookup failed"))
            .ok()
            .flatten();
        let sample = sample
            .inspect_err(|e| debug!(doc_type, error = %e, "Golden sample lookup failed"))
            .ok()
            .flatten();

        (style, sample)
    }

    fn spawn_side_effects(
        &self,
        request: &GenerationRequest,
        html: &str,
        usage: TokenUsage,
        credits: CreditUsage,
        plan: Plan,
    ) {
        let documents = Arc::clone(&self.documents);
        let (input_tokens, output_tokens) = usage.stored();
        let record = NewDocumentRecord {
            user_id: request.user_id.clone(),
            action: request.mode,
            document_type: request.doc_type.clone(),
            prompt: request.prompt.clone(),
            html_before: request.current_html.clone(),
            html_after: html.to_string(),
            input_tokens,
            output_tokens,
        };
        tokio::spawn(async move {
            let user_id = record.user_id.clone();
            if let Err(e) = documents.insert(record).await {
                warn!(%user_id, error = %e, "Failed to log document history");
            }
        });

        if request.mode == GenerationMode::Generate
            && let Some(doc_type) = request.doc_type.as_ref().filter(|d| !d.trim().is_empty())
        {
            self.side_effects.styles.extract_in_background(
                request.user_id.clone(),
                doc_type.clone(),
                html.to_string(),
            );
        }

        if credits.remaining() <= LOW_CREDITS_THRESHOLD
            && let Some(email) = request.email.as_ref().filter(|e| !e.trim().is_empty())
        {
            self.side_effects.email.notify(
                request.user_id.clone(),
                email.clone(),
                EmailType::CreditsLow,
                EmailData {
                    credits_remaining: Some(credits.remaining() as i64),
                    plan_name: Some(plan.label().to_string()),
                    ..Default::default()
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::email_service::EmailSettings;
    use crate::domain::entities::Profile;
    use crate::domain::repositories::{
        MockDocumentRepository, MockEmailLogRepository, MockProfileRepository,
        MockStyleRepository, MockTrainingRepository,
    };
    use crate::infrastructure::llm::{Completion, LlmError, MockLlmClient};
    use crate::infrastructure::mail::MockMailer;

    struct Mocks {
        llm: MockLlmClient,
        profiles: MockProfileRepository,
        documents: MockDocumentRepository,
        styles: MockStyleRepository,
        training: MockTrainingRepository,
    }

    impl Mocks {
        fn new() -> Self {
            let mut llm = MockLlmClient::new();
            llm.expect_is_configured().return_const(true);

            let mut documents = MockDocumentRepository::new();
            documents.expect_insert().returning(|_| Ok(()));

            let mut styles = MockStyleRepository::new();
            styles.expect_find().returning(|_, _| Ok(None));

            let mut training = MockTrainingRepository::new();
            training.expect_best_golden_sample().returning(|_| Ok(None));

            Self {
                llm,
                profiles: MockProfileRepository::new(),
                documents,
                styles,
                training,
            }
        }

        fn into_service(self) -> GenerationService {
            let mut style_llm = MockLlmClient::new();
            style_llm.expect_is_configured().return_const(false);
            let style_service = StyleService::new(
                Arc::new(style_llm),
                Arc::new(MockStyleRepository::new()),
            );

            let mut mail_log = MockEmailLogRepository::new();
            mail_log.expect_last_sent_at().returning(|_, _| Ok(None));
            mail_log.expect_record().returning(|_| Ok(()));
            let mut mailer = MockMailer::new();
            mailer
                .expect_send()
                .returning(|_| Ok(crate::infrastructure::mail::SentEmail { id: None }));
            let email = EmailService::new(
                Arc::new(mailer),
                Arc::new(mail_log),
                EmailSettings {
                    from: "DraftMyForms <support@draftmyforms.com>".to_string(),
                    reply_to: "support@draftmyforms.com".to_string(),
                    app_url: "https://www.draftmyforms.com".to_string(),
                },
            );

            GenerationService::new(
                Arc::new(self.llm),
                Arc::new(self.profiles),
                Arc::new(self.documents),
                Arc::new(self.styles),
                Arc::new(self.training),
                GenerationSideEffects {
                    styles: Arc::new(style_service),
                    email: Arc::new(email),
                },
                10,
            )
        }
    }

    fn profile(plan: &str, used: i32) -> Profile {
        Profile {
            id: "user-1".to_string(),
            email: Some("jane@example.com".to_string()),
            plan: plan.to_string(),
            credits_used: used,
            credits_reset_at: Some(Utc::now()),
            trial_eligible: true,
            ..Default::default()
        }
    }

    fn request(mode: GenerationMode) -> GenerationRequest {
        GenerationRequest {
            prompt: "Invoice for 3 hours of consulting".to_string(),
            mode,
            doc_type: None,
            user_id: "user-1".to_string(),
            current_html: None,
            email: None,
        }
    }

    #[test]
    fn test_stored_token_counts_clamp() {
        let usage = TokenUsage {
            input_tokens: u32::MAX,
            output_tokens: 512,
        };
        assert_eq!(usage.stored(), (i32::MAX, 512));
    }

    #[tokio::test]
    async fn test_generate_cleans_html_and_consumes_credit() {
        let mut mocks = Mocks::new();
        mocks
            .profiles
            .expect_find_by_id()
            .returning(|_| Ok(Some(profile("pro", 10))));
        mocks
            .documents
            .expect_count_for_user_since()
            .returning(|_, _| Ok(0));
        mocks
            .profiles
            .expect_set_credits_used()
            .withf(|user, used, _| user == "user-1" && *used == 11)
            .times(1)
            .returning(|_, _, _| Ok(()));
        mocks.llm.expect_complete().times(1).returning(|_| {
            Ok(Completion {
                text: "```html\n<html><body><h1>Invoice</h1><script>x()</script></body></html>\n```"
                    .to_string(),
                input_tokens: 120,
                output_tokens: 800,
            })
        });

        let outcome = mocks
            .into_service()
            .generate(request(GenerationMode::Generate))
            .await
            .unwrap();

        assert_eq!(outcome.html, "<h1>Invoice</h1>");
        assert_eq!(outcome.plan, Plan::Pro);
        assert_eq!(outcome.credits.used, 11);
        assert_eq!(outcome.credits.limit, 100);
        assert_eq!(outcome.usage.output_tokens, 800);
    }

    #[tokio::test]
    async fn test_exhausted_credits_return_payment_required() {
        let mut mocks = Mocks::new();
        mocks
            .profiles
            .expect_find_by_id()
            .returning(|_| Ok(Some(profile("free", 5))));
        mocks.llm.expect_complete().never();

        let err = mocks
            .into_service()
            .generate(request(GenerationMode::Generate))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PaymentRequired { .. }));
    }

    #[tokio::test]
    async fn test_previous_month_usage_is_reset() {
        let mut mocks = Mocks::new();
        mocks.profiles.expect_find_by_id().returning(|_| {
            let mut p = profile("free", 5);
            p.credits_reset_at = Some(Utc::now() - Duration::days(40));
            Ok(Some(p))
        });
        mocks
            .documents
            .expect_count_for_user_since()
            .returning(|_, _| Ok(0));
        mocks
            .profiles
            .expect_set_credits_used()
            .withf(|_, used, _| *used == 1)
            .returning(|_, _, _| Ok(()));
        mocks.llm.expect_complete().returning(|_| {
            Ok(Completion {
                text: "<p>ok</p>".to_string(),
                input_tokens: 1,
                output_tokens: 1,
            })
        });

        let outcome = mocks
            .into_service()
            .generate(request(GenerationMode::Generate))
            .await
            .unwrap();

        assert_eq!(outcome.credits.used, 1);
    }

    #[tokio::test]
    async fn test_rate_limit() {
        let mut mocks = Mocks::new();
        mocks
            .profiles
            .expect_find_by_id()
            .returning(|_| Ok(Some(profile("business", 0))));
        mocks
            .documents
            .expect_count_for_user_since()
            .returning(|_, _| Ok(10));
        mocks.llm.expect_complete().never();

        let err = mocks
            .into_service()
            .generate(request(GenerationMode::Generate))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::TooManyRequests { .. }));
    }

    #[tokio::test]
    async fn test_failing_rate_limit_query_is_ignored() {
        let mut mocks = Mocks::new();
        mocks
            .profiles
            .expect_find_by_id()
            .returning(|_| Ok(Some(profile("pro", 0))));
        mocks
            .documents
            .expect_count_for_user_since()
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));
        mocks
            .profiles
            .expect_set_credits_used()
            .returning(|_, _, _| Err(AppError::internal("Database error", json!({}))));
        mocks.llm.expect_complete().returning(|_| {
            Ok(Completion {
                text: "<p>ok</p>".to_string(),
                input_tokens: 1,
                output_tokens: 1,
            })
        });

        let result = mocks
            .into_service()
            .generate(request(GenerationMode::Generate))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_edit_requires_current_html() {
        let mocks = Mocks::new();

        let err = mocks
            .into_service()
            .generate(request(GenerationMode::Edit))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_edit_sends_current_html() {
        let mut mocks = Mocks::new();
        mocks
            .profiles
            .expect_find_by_id()
            .returning(|_| Ok(Some(profile("pro", 0))));
        mocks
            .documents
            .expect_count_for_user_since()
            .returning(|_, _| Ok(0));
        mocks
            .profiles
            .expect_set_credits_used()
            .returning(|_, _, _| Ok(()));
        mocks
            .llm
            .expect_complete()
            .withf(|req| req.user_message.contains("<h1>Old</h1>"))
            .times(1)
            .returning(|_| {
                Ok(Completion {
                    text: "<h1>New</h1>".to_string(),
                    input_tokens: 1,
                    output_tokens: 1,
                })
            });

        let mut req = request(GenerationMode::Edit);
        req.current_html = Some("<h1>Old</h1>".to_string());
        let outcome = mocks.into_service().generate(req).await.unwrap();

        assert_eq!(outcome.mode, GenerationMode::Edit);
        assert_eq!(outcome.html, "<h1>New</h1>");
    }

    #[tokio::test]
    async fn test_style_and_golden_sample_reach_system_prompt() {
        let mut mocks = Mocks::new();
        mocks.styles = MockStyleRepository::new();
        mocks.styles.expect_find().returning(|_, _| {
            Ok(Some(StyleFingerprint {
                primary_color: Some("#123456".to_string()),
                ..Default::default()
            }))
        });
        mocks.training = MockTrainingRepository::new();
        mocks.training.expect_best_golden_sample().returning(|_| {
            Ok(Some(GoldenSample {
                document_type: "invoice".to_string(),
                prompt: "p".to_string(),
                html: "<table>golden</table>".to_string(),
                quality_score: 9.5,
            }))
        });
        mocks
            .profiles
            .expect_find_by_id()
            .returning(|_| Ok(Some(profile("pro", 0))));
        mocks
            .documents
            .expect_count_for_user_since()
            .returning(|_, _| Ok(0));
        mocks
            .profiles
            .expect_set_credits_used()
            .returning(|_, _, _| Ok(()));
        mocks
            .llm
            .expect_complete()
            .withf(|req| {
                req.system.contains("#123456")
                    && req.system.contains("<table>golden</table>")
                    && req.user_message.starts_with("Generate a professional invoice document.")
            })
            .times(1)
            .returning(|_| {
                Ok(Completion {
                    text: "<p>ok</p>".to_string(),
                    input_tokens: 1,
                    output_tokens: 1,
                })
            });

        let mut req = request(GenerationMode::Generate);
        req.doc_type = Some("invoice".to_string());
        assert!(mocks.into_service().generate(req).await.is_ok());
    }

    #[tokio::test]
    async fn test_llm_failure_is_upstream_error() {
        let mut mocks = Mocks::new();
        mocks
            .profiles
            .expect_find_by_id()
            .returning(|_| Ok(Some(profile("pro", 0))));
        mocks
            .documents
            .expect_count_for_user_since()
            .returning(|_, _| Ok(0));
        mocks.profiles.expect_set_credits_used().never();
        mocks.llm.expect_complete().returning(|_| {
            Err(LlmError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let err = mocks
            .into_service()
            .generate(request(GenerationMode::Generate))
            .await
            .unwrap_err();

        match err {
            AppError::Upstream { message, .. } => {
                assert_eq!(message, "Failed to generate document. Please try again.")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.profiles.expect_find_by_id().returning(|_| Ok(None));

        let err = mocks
            .into_service()
            .generate(request(GenerationMode::Generate))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
