#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use draftmyforms_api::application::services::auth_service::AccessPolicy;
use draftmyforms_api::application::services::billing_service::PriceCatalog;
use draftmyforms_api::application::services::email_service::EmailSettings;
use draftmyforms_api::domain::entities::{
    ActivityFlag, DocumentRecord, EmailType, GoldenSample, NewActivityFlag, NewDocumentRecord,
    NewEmailLog, NewEvaluation, NewGoldenSample, NewTemplate, NewTrainingRun, NewUserSession, Plan,
    Profile, ProfileSummary, SeoTemplate, StyleFingerprint, TemplateFilter, TemplatePage,
    TemplateSummary, TierCount, TrainingRun, UserActivitySummary, UserSession,
};
use draftmyforms_api::domain::repositories::{
    ActivityFlagRepository, DocumentRepository, EmailLogRepository, ProfileRepository,
    SessionRepository, StyleRepository, TemplateRepository, TrainingRepository,
};
use draftmyforms_api::error::AppError;
use draftmyforms_api::infrastructure::identity::{
    AuthUser, IdentityError, IdentityProvider, IdentityResult,
};
use draftmyforms_api::infrastructure::llm::{
    Completion, CompletionRequest, LlmClient, LlmError, LlmResult,
};
use draftmyforms_api::infrastructure::mail::{MailResult, Mailer, OutgoingEmail, SentEmail};
use draftmyforms_api::infrastructure::payments::StripeClient;
use draftmyforms_api::infrastructure::persistence::DatabaseHealth;
use draftmyforms_api::state::{AppState, Providers, Repositories, Settings};

pub const ADMIN_EMAIL: &str = "owner@draftmyforms.com";
pub const ADMIN_TOKEN: &str = "admin-access-token";
pub const USER_TOKEN: &str = "user-access-token";
pub const ADMIN_KEY: &str = "test-admin-key";
pub const CRON_SECRET: &str = "test-cron-secret";
pub const WEBHOOK_SECRET: &str = "whsec_test";
pub const USER_ID: &str = "5f0c6c1e-7d1a-4b8e-9a55-1d2f3e4a5b6c";

#[derive(Default)]
pub struct InMemoryProfiles {
    pub rows: Mutex<HashMap<String, Profile>>,
}

impl InMemoryProfiles {
    pub fn insert(&self, profile: Profile) {
        self.rows
            .lock()
            .unwrap()
            .insert(profile.id.clone(), profile);
    }

    pub fn get(&self, user_id: &str) -> Option<Profile> {
        self.rows.lock().unwrap().get(user_id).cloned()
    }

    fn update(&self, user_id: &str, f: impl FnOnce(&mut Profile)) {
        if let Some(profile) = self.rows.lock().unwrap().get_mut(user_id) {
            f(profile);
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        Ok(self.get(user_id))
    }

    async fn set_credits_used(
        &self,
        user_id: &str,
        credits_used: i32,
        reset_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.update(user_id, |p| {
            p.credits_used = credits_used;
            p.credits_reset_at = Some(reset_at);
        });
        Ok(())
    }

    async fn update_active_days(
        &self,
        user_id: &str,
        days: Vec<String>,
        active_days_count: i32,
        trial_eligible: bool,
    ) -> Result<(), AppError> {
        self.update(user_id, |p| {
            p.active_days_log = days;
            p.active_days_count = active_days_count;
            p.trial_eligible = trial_eligible;
        });
        Ok(())
    }

    async fn set_customer_id(&self, user_id: &str, customer_id: &str) -> Result<(), AppError> {
        self.update(user_id, |p| p.stripe_customer_id = Some(customer_id.to_string()));
        Ok(())
    }

    async fn set_plan(&self, user_id: &str, plan: Plan) -> Result<(), AppError> {
        self.update(user_id, |p| p.plan = plan.as_str().to_string());
        Ok(())
    }

    async fn set_plan_and_customer(
        &self,
        user_id: &str,
        plan: Plan,
        customer_id: Option<String>,
    ) -> Result<(), AppError> {
        self.update(user_id, |p| {
            p.plan = plan.as_str().to_string();
            if customer_id.is_some() {
                p.stripe_customer_id = customer_id;
            }
        });
        Ok(())
    }

    async fn activate_subscription(
        &self,
        user_id: &str,
        plan: Plan,
        customer_id: Option<String>,
    ) -> Result<Option<Profile>, AppError> {
        self.update(user_id, |p| {
            p.plan = plan.as_str().to_string();
            p.credits_used = 0;
            p.credits_reset_at = Some(Utc::now());
            if customer_id.is_some() {
                p.stripe_customer_id = customer_id;
            }
        });
        Ok(self.get(user_id))
    }

    async fn downgrade_customer(&self, customer_id: &str) -> Result<Vec<Profile>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let mut downgraded = Vec::new();
        for profile in rows.values_mut() {
            if profile.stripe_customer_id.as_deref() == Some(customer_id) {
                profile.plan = Plan::Free.as_str().to_string();
                downgraded.push(profile.clone());
            }
        }
        Ok(downgraded)
    }

    async fn list_summaries(&self) -> Result<Vec<ProfileSummary>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .map(|p| ProfileSummary {
                id: p.id.clone(),
                email: p.email.clone(),
                display_name: p.display_name.clone(),
                plan: p.plan.clone(),
                role: p.role.clone(),
                stripe_customer_id: p.stripe_customer_id.clone(),
                created_at: Utc::now(),
            })
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryDocuments {
    pub rows: Mutex<Vec<DocumentRecord>>,
    pub fail_reads: AtomicBool,
}

impl InMemoryDocuments {
    pub fn push(&self, user_id: &str, document_type: &str, prompt: &str, html: &str) {
        let mut rows = self.rows.lock().unwrap();
        let id = format!("doc-{}", rows.len() + 1);
        rows.push(DocumentRecord {
            id,
            user_id: user_id.to_string(),
            action: "generate".to_string(),
            document_type: Some(document_type.to_string()),
            prompt: Some(prompt.to_string()),
            html_before: None,
            html_after: Some(html.to_string()),
            input_tokens: Some(100),
            output_tokens: Some(400),
            created_at: Utc::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocuments {
    async fn insert(&self, record: NewDocumentRecord) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        let id = format!("doc-{}", rows.len() + 1);
        rows.push(DocumentRecord {
            id,
            user_id: record.user_id,
            action: record.action.as_str().to_string(),
            document_type: record.document_type,
            prompt: Some(record.prompt),
            html_before: record.html_before,
            html_after: Some(record.html_after),
            input_tokens: Some(record.input_tokens),
            output_tokens: Some(record.output_tokens),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn count_for_user_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id == user_id && d.created_at >= since)
            .count() as i64)
    }

    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.created_at >= since)
            .count() as i64)
    }

    async fn list_since(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<DocumentRecord>, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::internal(
                "Database error",
                serde_json::json!({ "reason": "connection reset" }),
            ));
        }
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .filter(|d| d.created_at >= since)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<DocumentRecord>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .filter(|d| d.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemorySessions {
    pub rows: Mutex<Vec<UserSession>>,
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn insert(&self, session: NewUserSession) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        let id = format!("session-{}", rows.len() + 1);
        rows.push(UserSession {
            id,
            user_id: session.user_id,
            email: Some(session.email),
            ip_address: Some(session.ip_address),
            user_agent: Some(session.user_agent),
            logged_in_at: Utc::now(),
            last_active_at: None,
            is_active: true,
        });
        Ok(())
    }

    async fn distinct_ips_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<String>, AppError> {
        let mut ips: Vec<String> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id && s.logged_in_at >= since)
            .filter_map(|s| s.ip_address.clone())
            .collect();
        ips.sort();
        ips.dedup();
        Ok(ips)
    }

    async fn count_active_since(&self, since: DateTime<Utc>) -> Result<i64, AppError> {
        let mut users: Vec<String> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.logged_in_at >= since)
            .map(|s| s.user_id.clone())
            .collect();
        users.sort();
        users.dedup();
        Ok(users.len() as i64)
    }

    async fn list_for_user(&self, user_id: &str, limit: i64) -> Result<Vec<UserSession>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn activity_summary(&self) -> Result<Vec<UserActivitySummary>, AppError> {
        Ok(vec![])
    }

    async fn url_click_summary(&self, _limit: i64) -> Result<Vec<Value>, AppError> {
        Ok(vec![])
    }
}

#[derive(Default)]
pub struct InMemoryFlags {
    pub rows: Mutex<Vec<ActivityFlag>>,
}

#[async_trait]
impl ActivityFlagRepository for InMemoryFlags {
    async fn insert(&self, flag: NewActivityFlag) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        let id = format!("flag-{}", rows.len() + 1);
        rows.push(ActivityFlag {
            id,
            user_id: flag.user_id,
            email: Some(flag.email),
            flag_type: flag.flag_type,
            severity: flag.severity,
            details: flag.details,
            resolved: false,
            resolved_at: None,
            resolved_by: None,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn count_unresolved(&self) -> Result<i64, AppError> {
        Ok(self.rows.lock().unwrap().iter().filter(|f| !f.resolved).count() as i64)
    }

    async fn list_unresolved(&self) -> Result<Vec<ActivityFlag>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| !f.resolved)
            .cloned()
            .collect())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ActivityFlag>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn resolve(
        &self,
        flag_id: &str,
        resolved_by: &str,
    ) -> Result<Option<ActivityFlag>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|f| f.id == flag_id).map(|flag| {
            flag.resolved = true;
            flag.resolved_at = Some(Utc::now());
            flag.resolved_by = Some(resolved_by.to_string());
            flag.clone()
        }))
    }
}

#[derive(Default)]
pub struct InMemoryTemplates {
    pub rows: Mutex<Vec<TemplateSummary>>,
    pub seo_pages: Mutex<Vec<(i32, SeoTemplate)>>,
}

impl InMemoryTemplates {
    pub fn add_seo_page(&self, category_id: i32, slug: &str) {
        self.seo_pages.lock().unwrap().push((
            category_id,
            SeoTemplate {
                slug: slug.to_string(),
                updated_at: None,
            },
        ));
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

fn matches(value: &str, filter: &Option<String>) -> bool {
    filter.as_deref().is_none_or(|f| value == f)
}

#[async_trait]
impl TemplateRepository for InMemoryTemplates {
    async fn delete_all(&self) -> Result<u64, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let count = rows.len() as u64;
        rows.clear();
        Ok(count)
    }

    async fn insert_batch(&self, templates: Vec<NewTemplate>) -> Result<u64, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let inserted = templates.len() as u64;
        for t in templates {
            let id = rows.len() as i64 + 1;
            rows.push(TemplateSummary {
                id,
                name: t.name,
                slug: t.slug,
                category: t.category,
                tier: t.tier.as_str().to_string(),
                style_id: t.style_id,
                style_name: t.style_name,
                industry: t.industry,
                document_type: t.document_type,
                primary_color: t.primary_color,
                secondary_color: t.secondary_color,
                accent_color: t.accent_color,
                heading_font: t.heading_font,
                body_font: t.body_font,
                mood: t.mood,
                is_active: t.is_active,
                sort_order: t.sort_order,
            });
        }
        Ok(inserted)
    }

    async fn list(&self, filter: TemplateFilter) -> Result<TemplatePage, AppError> {
        let rows = self.rows.lock().unwrap();
        let search = filter.search.as_deref().map(str::to_lowercase);
        let mut matching: Vec<TemplateSummary> = rows
            .iter()
            .filter(|t| t.is_active)
            .filter(|t| matches(&t.industry, &filter.industry))
            .filter(|t| matches(&t.document_type, &filter.document_type))
            .filter(|t| matches(&t.style_id, &filter.style_id))
            .filter(|t| matches(&t.tier, &filter.tier))
            .filter(|t| {
                search
                    .as_deref()
                    .is_none_or(|s| t.name.to_lowercase().contains(s))
            })
            .cloned()
            .collect();
        matching.sort_by_key(|t| t.sort_order);

        let total = matching.len() as i64;
        let templates = matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect();

        Ok(TemplatePage { templates, total })
    }

    async fn count_by_tier(&self) -> Result<Vec<TierCount>, AppError> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for t in self.rows.lock().unwrap().iter().filter(|t| t.is_active) {
            *counts.entry(t.tier.clone()).or_default() += 1;
        }
        let mut counts: Vec<TierCount> = counts
            .into_iter()
            .map(|(tier, count)| TierCount { tier, count })
            .collect();
        counts.sort_by(|a, b| a.tier.cmp(&b.tier));
        Ok(counts)
    }

    async fn seo_pages_for_category(
        &self,
        category_id: i32,
        limit: i64,
    ) -> Result<Vec<SeoTemplate>, AppError> {
        Ok(self
            .seo_pages
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == category_id)
            .take(limit as usize)
            .map(|(_, page)| page.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryEmailLog {
    pub rows: Mutex<Vec<(String, EmailType, DateTime<Utc>)>>,
}

#[async_trait]
impl EmailLogRepository for InMemoryEmailLog {
    async fn last_sent_at(
        &self,
        user_id: &str,
        email_type: EmailType,
    ) -> Result<Option<DateTime<Utc>>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, t, _)| u == user_id && *t == email_type)
            .map(|(_, _, at)| *at)
            .max())
    }

    async fn record(&self, entry: NewEmailLog) -> Result<(), AppError> {
        self.rows
            .lock()
            .unwrap()
            .push((entry.user_id, entry.email_type, Utc::now()));
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTraining {
    pub evaluations: Mutex<Vec<NewEvaluation>>,
    pub golden_samples: Mutex<Vec<NewGoldenSample>>,
    pub runs: Mutex<Vec<TrainingRun>>,
}

#[async_trait]
impl TrainingRepository for InMemoryTraining {
    async fn best_golden_sample(
        &self,
        document_type: &str,
    ) -> Result<Option<GoldenSample>, AppError> {
        Ok(self
            .golden_samples
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.document_type == document_type)
            .max_by(|a, b| a.quality_score.total_cmp(&b.quality_score))
            .map(|s| GoldenSample {
                document_type: s.document_type.clone(),
                prompt: s.prompt.clone(),
                html: s.html.clone(),
                quality_score: s.quality_score,
            }))
    }

    async fn insert_evaluation(&self, evaluation: NewEvaluation) -> Result<(), AppError> {
        self.evaluations.lock().unwrap().push(evaluation);
        Ok(())
    }

    async fn insert_golden_sample(&self, sample: NewGoldenSample) -> Result<(), AppError> {
        self.golden_samples.lock().unwrap().push(sample);
        Ok(())
    }

    async fn insert_run(&self, run: NewTrainingRun) -> Result<(), AppError> {
        self.runs.lock().unwrap().push(TrainingRun {
            run_date: run.run_date,
            documents_processed: run.documents_processed,
            avg_quality_score: run.avg_quality_score,
            issues_found: sqlx::types::Json(run.issues_found),
            golden_samples_created: run.golden_samples_created,
            api_cost: run.api_cost,
            duration_seconds: run.duration_seconds,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn runs_since(&self, since: DateTime<Utc>) -> Result<Vec<TrainingRun>, AppError> {
        Ok(self
            .runs
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.created_at >= since)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryStyles {
    pub rows: Mutex<HashMap<(String, String), StyleFingerprint>>,
}

#[async_trait]
impl StyleRepository for InMemoryStyles {
    async fn find(
        &self,
        user_id: &str,
        document_type: &str,
    ) -> Result<Option<StyleFingerprint>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&(user_id.to_string(), document_type.to_string()))
            .cloned())
    }

    async fn upsert(
        &self,
        user_id: &str,
        document_type: &str,
        fingerprint: StyleFingerprint,
    ) -> Result<(), AppError> {
        self.rows
            .lock()
            .unwrap()
            .insert((user_id.to_string(), document_type.to_string()), fingerprint);
        Ok(())
    }
}

pub struct FakeHealth {
    pub healthy: AtomicBool,
}

#[async_trait]
impl DatabaseHealth for FakeHealth {
    async fn ping(&self) -> Result<(), AppError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::internal(
                "Database error",
                serde_json::json!({ "reason": "connection refused" }),
            ))
        }
    }
}

/// Answers every completion with the same canned text.
pub struct FakeLlm {
    pub configured: bool,
    pub reply: Mutex<String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeLlm {
    pub fn set_reply(&self, reply: &str) {
        *self.reply.lock().unwrap() = reply.to_string();
    }
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn complete(&self, request: CompletionRequest) -> LlmResult<Completion> {
        if !self.configured {
            return Err(LlmError::NotConfigured);
        }
        self.requests.lock().unwrap().push(request);
        Ok(Completion {
            text: self.reply.lock().unwrap().clone(),
            input_tokens: 120,
            output_tokens: 480,
        })
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

#[derive(Default)]
pub struct FakeMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl FakeMailer {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, email: OutgoingEmail) -> MailResult<SentEmail> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(email);
        Ok(SentEmail {
            id: Some(format!("re_{}", sent.len())),
        })
    }
}

/// Maps access tokens to users.
#[derive(Default)]
pub struct FakeIdentity {
    pub users: HashMap<String, AuthUser>,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn user_for_token(&self, access_token: &str) -> IdentityResult<AuthUser> {
        self.users
            .get(access_token)
            .cloned()
            .ok_or(IdentityError::InvalidToken)
    }
}

/// Handles on the fakes behind a test state.
pub struct TestContext {
    pub profiles: Arc<InMemoryProfiles>,
    pub documents: Arc<InMemoryDocuments>,
    pub sessions: Arc<InMemorySessions>,
    pub flags: Arc<InMemoryFlags>,
    pub templates: Arc<InMemoryTemplates>,
    pub email_log: Arc<InMemoryEmailLog>,
    pub training: Arc<InMemoryTraining>,
    pub styles: Arc<InMemoryStyles>,
    pub health: Arc<FakeHealth>,
    pub llm: Arc<FakeLlm>,
    pub mailer: Arc<FakeMailer>,
}

pub fn profile(user_id: &str, plan: &str, credits_used: i32) -> Profile {
    Profile {
        id: user_id.to_string(),
        email: Some("jane@acme.com".to_string()),
        display_name: Some("Jane".to_string()),
        plan: plan.to_string(),
        role: Some("user".to_string()),
        stripe_customer_id: None,
        credits_used,
        credits_reset_at: Some(Utc::now()),
        active_days_log: vec![],
        active_days_count: 0,
        trial_eligible: true,
    }
}

/// Builds a state over in-memory fakes.
///
/// The payments client points at an unroutable address with no secret key, so only
/// webhook signature checks work offline.
pub fn create_test_state() -> (AppState, TestContext) {
    let ctx = TestContext {
        profiles: Arc::new(InMemoryProfiles::default()),
        documents: Arc::new(InMemoryDocuments::default()),
        sessions: Arc::new(InMemorySessions::default()),
        flags: Arc::new(InMemoryFlags::default()),
        templates: Arc::new(InMemoryTemplates::default()),
        email_log: Arc::new(InMemoryEmailLog::default()),
        training: Arc::new(InMemoryTraining::default()),
        styles: Arc::new(InMemoryStyles::default()),
        health: Arc::new(FakeHealth {
            healthy: AtomicBool::new(true),
        }),
        llm: Arc::new(FakeLlm {
            configured: true,
            reply: Mutex::new("<h1>Invoice</h1><p>Total due: $100</p>".to_string()),
            requests: Mutex::new(vec![]),
        }),
        mailer: Arc::new(FakeMailer::default()),
    };

    let mut users = HashMap::new();
    users.insert(
        ADMIN_TOKEN.to_string(),
        AuthUser {
            id: "admin-1".to_string(),
            email: Some(ADMIN_EMAIL.to_string()),
        },
    );
    users.insert(
        USER_TOKEN.to_string(),
        AuthUser {
            id: USER_ID.to_string(),
            email: Some("jane@acme.com".to_string()),
        },
    );

    let repos = Repositories {
        profiles: ctx.profiles.clone(),
        documents: ctx.documents.clone(),
        sessions: ctx.sessions.clone(),
        flags: ctx.flags.clone(),
        templates: ctx.templates.clone(),
        email_log: ctx.email_log.clone(),
        training: ctx.training.clone(),
        styles: ctx.styles.clone(),
        health: ctx.health.clone(),
    };

    let providers = Providers {
        llm: ctx.llm.clone(),
        payments: Arc::new(StripeClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            None,
            Some(WEBHOOK_SECRET.to_string()),
        )),
        mailer: ctx.mailer.clone(),
        identity: Arc::new(FakeIdentity { users }),
    };

    let settings = Settings {
        app_url: "https://draftmyforms.com".to_string(),
        site_url: "https://www.draftmyforms.com".to_string(),
        email: EmailSettings {
            from: "DraftMyForms <support@draftmyforms.com>".to_string(),
            reply_to: "support@draftmyforms.com".to_string(),
            app_url: "https://draftmyforms.com".to_string(),
        },
        prices: PriceCatalog {
            pro: Some("price_pro".to_string()),
            business: Some("price_business".to_string()),
        },
        access: AccessPolicy {
            admin_emails: vec![ADMIN_EMAIL.to_string()],
            admin_secret_key: Some(ADMIN_KEY.to_string()),
            cron_secret: Some(CRON_SECRET.to_string()),
        },
        generation_rate_limit_per_minute: 10,
    };

    (AppState::new(repos, providers, settings), ctx)
}
