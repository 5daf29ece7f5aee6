//! Visual style fingerprint of a user's documents.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Design traits extracted from a document, reused to keep later generations consistent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleFingerprint {
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
    /// `navy_bar`, `underlined`, `bordered`, `accent_line` or `plain_bold`.
    #[serde(default)]
    pub header_style: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub body_font_size: Option<String>,
    /// `full_grid`, `minimal`, `striped` or `borderless`.
    #[serde(default)]
    pub table_style: Option<String>,
    /// `compact`, `normal` or `spacious`.
    #[serde(default)]
    pub section_spacing: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub company_phone: Option<String>,
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl StyleFingerprint {
    /// Renders the fingerprint as prompt guidance lines. Empty fields are omitted.
    pub fn as_prompt_guidance(&self) -> String {
        let entries = [
            ("Primary color", &self.primary_color),
            ("Accent color", &self.accent_color),
            ("Font family", &self.font_family),
            ("Header style", &self.header_style),
            ("Body font size", &self.body_font_size),
            ("Table style", &self.table_style),
            ("Section spacing", &self.section_spacing),
            ("Company name", &self.company_name),
            ("Company address", &self.company_address),
            ("Company phone", &self.company_phone),
        ];

        entries
            .iter()
            .filter_map(|(label, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| format!("- {label}: {v}"))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
