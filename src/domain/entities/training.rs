//! Quality evaluations, golden samples and training-run bookkeeping.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum evaluation score for a document to become a golden sample.
pub const GOLDEN_SAMPLE_MIN_SCORE: f64 = 9.0;

/// Estimated provider cost of one evaluation call, in USD.
pub const EVALUATION_COST_USD: f64 = 0.005;

/// Average score below which the weekly report raises a warning.
pub const QUALITY_WARNING_THRESHOLD: f64 = 7.0;

/// The model's verdict on one document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Evaluation {
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvaluation {
    pub document_history_id: String,
    pub quality_score: f64,
    pub issues: Vec<String>,
    pub suggestions: String,
}

/// A high-scoring document kept as a few-shot reference.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct GoldenSample {
    pub document_type: String,
    pub prompt: String,
    pub html: String,
    pub quality_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoldenSample {
    pub document_type: String,
    pub prompt: String,
    pub html: String,
    pub quality_score: f64,
    pub tags: Vec<String>,
}

/// A row of `training_runs`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrainingRun {
    pub run_date: NaiveDate,
    pub documents_processed: i32,
    pub avg_quality_score: f64,
    pub issues_found: sqlx::types::Json<BTreeMap<String, i64>>,
    pub golden_samples_created: i32,
    pub api_cost: f64,
    pub duration_seconds: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTrainingRun {
    pub run_date: NaiveDate,
    pub documents_processed: i32,
    pub avg_quality_score: f64,
    pub issues_found: BTreeMap<String, i64>,
    pub golden_samples_created: i32,
    pub api_cost: f64,
    pub duration_seconds: i32,
}

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Aggregate of several training runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeeklyTotals {
    pub documents_processed: i64,
    pub avg_quality_score: f64,
    pub golden_samples_created: i64,
    pub training_cost: f64,
    pub issues: BTreeMap<String, i64>,
}

impl WeeklyTotals {
    /// Sums runs. The average is weighted by documents; runs scoring 0 are left out of it.
    pub fn from_runs(runs: &[TrainingRun]) -> Self {
        let mut totals = WeeklyTotals::default();
        let mut weighted_score = 0.0;
        let mut scored_docs: i64 = 0;

        for run in runs {
            let docs = i64::from(run.documents_processed.max(0));
            totals.documents_processed += docs;
            if run.avg_quality_score > 0.0 {
                weighted_score += run.avg_quality_score * docs as f64;
                scored_docs += docs;
            }
            totals.golden_samples_created += i64::from(run.golden_samples_created.max(0));
            totals.training_cost += run.api_cost;
            for (issue, count) in run.issues_found.iter() {
                *totals.issues.entry(issue.clone()).or_default() += count;
            }
        }

        if scored_docs > 0 {
            totals.avg_quality_score = round1(weighted_score / scored_docs as f64);
        }
        totals
    }

    /// The `n` most frequent issues, most frequent first. Ties keep name order.
    pub fn top_issues(&self, n: usize) -> Vec<(String, i64)> {
        let mut ranked: Vec<(String, i64)> =
            self.issues.iter().map(|(k, v)| (k.clone(), *v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    pub fn quality_warning(&self) -> bool {
        self.avg_quality_score < QUALITY_WARNING_THRESHOLD
    }
}
