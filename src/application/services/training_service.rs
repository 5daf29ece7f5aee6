//! Scheduled quality evaluation of generated documents.
//!
//! The nightly job scores recent documents with the LLM, keeps the best ones as
//! golden samples and records a training run. The weekly report aggregates the
//! runs of the last seven days.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::domain::entities::training::{
    EVALUATION_COST_USD, GOLDEN_SAMPLE_MIN_SCORE, round1,
};
use crate::domain::entities::{
    DocumentRecord, Evaluation, NewEvaluation, NewGoldenSample, NewTrainingRun, WeeklyTotals,
};
use crate::domain::prompts::{EVALUATION_MAX_TOKENS, EVALUATION_PROMPT, evaluation_user_message};
use crate::domain::repositories::{DocumentRepository, TrainingRepository};
use crate::error::AppError;
use crate::infrastructure::llm::{CompletionRequest, LlmClient};
use crate::utils::html::strip_code_fences;
use crate::utils::text::truncate_chars;

/// Documents evaluated per nightly run.
pub const NIGHTLY_BATCH: i64 = 50;
/// Documents shorter than this are not worth scoring.
pub const MIN_HTML_CHARS: usize = 100;
/// Longest HTML stored in a golden sample.
pub const GOLDEN_SAMPLE_MAX_CHARS: usize = 50_000;
/// Issues listed in the text report; the JSON report carries all of them.
pub const TOP_ISSUES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NightlyReport {
    pub documents_processed: i32,
    pub avg_quality_score: f64,
    pub golden_samples_created: i32,
    pub issues: BTreeMap<String, i64>,
    pub duration_seconds: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NightlyOutcome {
    NoDocuments,
    Completed(NightlyReport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub week_ending: DateTime<Utc>,
    pub documents_processed: i64,
    pub avg_quality_score: f64,
    pub golden_samples_created: i64,
    pub training_cost: f64,
    pub top_issues: BTreeMap<String, i64>,
    pub quality_warning: bool,
}

impl WeeklyReport {
    fn from_totals(totals: WeeklyTotals, week_ending: DateTime<Utc>) -> Self {
        Self {
            week_ending,
            documents_processed: totals.documents_processed,
            avg_quality_score: totals.avg_quality_score,
            golden_samples_created: totals.golden_samples_created,
            training_cost: totals.training_cost,
            quality_warning: totals.quality_warning(),
            top_issues: totals.issues,
        }
    }

    /// Plain-text rendition for logs and the terminal.
    pub fn to_text(&self) -> String {
        let mut ranked: Vec<(&String, &i64)> = self.top_issues.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1));
        let top = ranked
            .iter()
            .take(TOP_ISSUES)
            .map(|(issue, count)| format!("{issue}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut text = String::new();
        let _ = writeln!(text, "DraftMyForms Weekly AI Training Report");
        let _ = writeln!(text, "Week ending: {}", self.week_ending.date_naive());
        let _ = writeln!(text, "Documents processed: {}", self.documents_processed);
        let _ = writeln!(text, "Average quality score: {} / 10", self.avg_quality_score);
        let _ = writeln!(text, "Golden samples created: {}", self.golden_samples_created);
        let _ = writeln!(text, "Training cost: ${:.4}", self.training_cost);
        let _ = write!(
            text,
            "Top issues: {}",
            if top.is_empty() { "None" } else { top.as_str() }
        );
        if self.quality_warning {
            text.push_str(
                "\n\nACTION REQUIRED: Average quality score is below 7.0. \
                 Review the AI system prompt and recent evaluations.",
            );
        }
        text
    }
}

/// Running tallies of one nightly run.
#[derive(Default)]
struct Tally {
    evaluated: i32,
    total_score: f64,
    golden: i32,
    cost: f64,
    issues: BTreeMap<String, i64>,
}

pub struct TrainingService {
    llm: Arc<dyn LlmClient>,
    documents: Arc<dyn DocumentRepository>,
    training: Arc<dyn TrainingRepository>,
}

impl TrainingService {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        documents: Arc<dyn DocumentRepository>,
        training: Arc<dyn TrainingRepository>,
    ) -> Self {
        Self {
            llm,
            documents,
            training,
        }
    }

    /// Evaluates the documents of the last 24 hours.
    ///
    /// Failures on individual documents are logged and skipped.
    pub async fn run_nightly(&self) -> Result<NightlyOutcome, AppError> {
        let started = Instant::now();

        if !self.llm.is_configured() {
            return Err(AppError::internal("AI service not configured", json!({})));
        }

        let since = Utc::now() - Duration::hours(24);
        let docs = match self.documents.list_since(since, NIGHTLY_BATCH).await {
            Ok(docs) => docs,
            Err(e) => {
                warn!(error = %e, "Nightly training: failed to load documents");
                Vec::new()
            }
        };
        if docs.is_empty() {
            info!("Nightly training: no documents to evaluate");
            return Ok(NightlyOutcome::NoDocuments);
        }

        let mut tally = Tally::default();
        for doc in &docs {
            let Some(html) = doc
                .html_after
                .as_deref()
                .filter(|h| h.chars().count() >= MIN_HTML_CHARS)
            else {
                continue;
            };

            if let Err(e) = self.evaluate_document(doc, html, &mut tally).await {
                warn!(document_id = %doc.id, error = %e, "Evaluation failed");
            }
        }

        let avg_quality_score = if tally.evaluated > 0 {
            round1(tally.total_score / f64::from(tally.evaluated))
        } else {
            0.0
        };
        let duration_seconds = started.elapsed().as_secs_f64().round() as i32;

        let run = NewTrainingRun {
            run_date: Utc::now().date_naive(),
            documents_processed: tally.evaluated,
            avg_quality_score,
            issues_found: tally.issues.clone(),
            golden_samples_created: tally.golden,
            api_cost: tally.cost,
            duration_seconds,
        };
        if let Err(e) = self.training.insert_run(run).await {
            warn!(error = %e, "Failed to record training run");
        }

        info!(
            evaluated = tally.evaluated,
            avg_quality_score,
            golden = tally.golden,
            duration_seconds,
            "Nightly training finished"
        );

        Ok(NightlyOutcome::Completed(NightlyReport {
            documents_processed: tally.evaluated,
            avg_quality_score,
            golden_samples_created: tally.golden,
            issues: tally.issues,
            duration_seconds,
        }))
    }

    async fn evaluate_document(
        &self,
        doc: &DocumentRecord,
        html: &str,
        tally: &mut Tally,
    ) -> Result<(), String> {
        let completion = self
            .llm
            .complete(CompletionRequest {
                system: EVALUATION_PROMPT.to_string(),
                user_message: evaluation_user_message(
                    doc.document_type.as_deref(),
                    doc.prompt.as_deref(),
                    html,
                ),
                max_tokens: EVALUATION_MAX_TOKENS,
            })
            .await
            .map_err(|e| e.to_string())?;
        tally.cost += EVALUATION_COST_USD;

        let evaluation: Evaluation = serde_json::from_str(strip_code_fences(&completion.text).trim())
            .map_err(|e| format!("invalid evaluation JSON: {e}"))?;

        if let Err(e) = self
            .training
            .insert_evaluation(NewEvaluation {
                document_history_id: doc.id.clone(),
                quality_score: evaluation.score,
                issues: evaluation.issues.clone(),
                suggestions: evaluation.suggestions.clone().unwrap_or_default(),
            })
            .await
        {
            warn!(document_id = %doc.id, error = %e, "Failed to store evaluation");
        }

        tally.total_score += evaluation.score;
        tally.evaluated += 1;
        for issue in &evaluation.issues {
            *tally.issues.entry(issue.clone()).or_default() += 1;
        }

        if evaluation.score >= GOLDEN_SAMPLE_MIN_SCORE
            && let (Some(prompt), Some(document_type)) = (
                doc.prompt.as_deref().filter(|p| !p.is_empty()),
                doc.document_type.as_deref().filter(|t| !t.is_empty()),
            )
        {
            let sample = NewGoldenSample {
                document_type: document_type.to_string(),
                prompt: prompt.to_string(),
                html: truncate_chars(html, GOLDEN_SAMPLE_MAX_CHARS).to_string(),
                quality_score: evaluation.score,
                tags: if evaluation.issues.is_empty() {
                    vec!["flawless".to_string()]
                } else {
                    Vec::new()
                },
            };
            match self.training.insert_golden_sample(sample).await {
                Ok(()) => tally.golden += 1,
                Err(e) => warn!(document_id = %doc.id, error = %e, "Failed to store golden sample"),
            }
        }

        Ok(())
    }

    /// Aggregates the training runs of the last seven days.
    pub async fn weekly_report(&self) -> Result<WeeklyReport, AppError> {
        let now = Utc::now();
        let runs = self.training.runs_since(now - Duration::days(7)).await?;
        let report = WeeklyReport::from_totals(WeeklyTotals::from_runs(&runs), now);

        info!(runs = runs.len(), "{}", report.to_text());
        Ok(report)
    }
}
