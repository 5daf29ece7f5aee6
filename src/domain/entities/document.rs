//! Generated-document history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a request creates a new document or edits an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Generate,
    Edit,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Generate => "generate",
            GenerationMode::Edit => "edit",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of `document_history`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DocumentRecord {
    pub id: String,
    pub user_id: String,
    pub action: String,
    pub document_type: Option<String>,
    pub prompt: Option<String>,
    pub html_before: Option<String>,
    pub html_after: Option<String>,
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDocumentRecord {
    pub user_id: String,
    pub action: GenerationMode,
    pub document_type: Option<String>,
    pub prompt: String,
    pub html_before: Option<String>,
    pub html_after: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
}
