//! DTOs for the scheduled training jobs.

use serde::Serialize;

use crate::application::services::training_service::{NightlyOutcome, NightlyReport, WeeklyReport};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum NightlyResponse {
    Empty {
        message: &'static str,
        count: u32,
    },
    Completed {
        success: bool,
        #[serde(flatten)]
        report: NightlyReport,
    },
}

impl From<NightlyOutcome> for NightlyResponse {
    fn from(outcome: NightlyOutcome) -> Self {
        match outcome {
            NightlyOutcome::NoDocuments => NightlyResponse::Empty {
                message: "No documents to evaluate",
                count: 0,
            },
            NightlyOutcome::Completed(report) => NightlyResponse::Completed {
                success: true,
                report,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WeeklyReportResponse {
    pub success: bool,
    pub report: WeeklyReport,
}
