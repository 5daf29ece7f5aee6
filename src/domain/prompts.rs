//! Prompt text sent to the LLM.

use super::entities::{GenerationMode, GoldenSample, StyleFingerprint};
use crate::utils::text::truncate_chars;

/// Longest golden-sample excerpt embedded as a reference.
pub const GOLDEN_SAMPLE_EXCERPT_CHARS: usize = 6_000;
/// Longest document excerpt sent for style extraction.
pub const STYLE_EXCERPT_CHARS: usize = 4_000;
pub const EVALUATION_PROMPT_EXCERPT_CHARS: usize = 200;
pub const EVALUATION_HTML_EXCERPT_CHARS: usize = 3_000;

pub const GENERATION_MAX_TOKENS: u32 = 4_000;
pub const STYLE_MAX_TOKENS: u32 = 1_000;
pub const EVALUATION_MAX_TOKENS: u32 = 500;

const GENERATION_BASE_PROMPT: &str = "You are a professional document generator for DraftMyForms.com. Generate clean, professional HTML documents.

RULES:
- Output ONLY the HTML content for the document body (no <html>, <head>, <body> tags)
- Use clean inline styles for formatting
- Use professional fonts: Georgia for headings, system-ui for body
- Use colors: #c99532 (gold) for accents, #2d2926 for text, #8a7f76 for muted
- Include proper structure: headers, sections, tables where appropriate
- For invoices: include company info, line items table, totals
- For contracts: include parties, terms, signature lines
- For letters: include sender, recipient, date, body, signature
- For resumes: include contact info, summary, experience, education, skills
- Make the document look ready to print/PDF
- Do NOT include any JavaScript
- Do NOT include any placeholder text like [Your Name] - use realistic sample data if specific data not provided
- Keep within 4000 tokens maximum";

pub const STYLE_EXTRACTION_PROMPT: &str = "You analyze HTML documents and extract their visual design fingerprint. Return ONLY valid JSON with these fields: primary_color (hex), accent_color (hex or null), font_family, header_style (\"navy_bar\", \"underlined\", \"bordered\", \"accent_line\", \"plain_bold\"), body_font_size, table_style (\"full_grid\", \"minimal\", \"striped\", \"borderless\"), section_spacing (\"compact\", \"normal\", \"spacious\"), company_name (if found, else null), company_address (if found, else null), company_phone (if found, else null)";

pub const EVALUATION_PROMPT: &str = "You evaluate HTML document quality for a professional document generation platform. Score 1-10. Return ONLY valid JSON: {\"score\": N, \"issues\": [\"issue1\", \"issue2\"], \"suggestions\": \"text\"}. Issues to check: font_too_large, page_overflow, missing_borders, poor_alignment, excess_whitespace, inconsistent_style, missing_print_css, generic_styling. Score 10=publication-quality, 8-9=good, 6-7=acceptable, 4-5=below standard, 1-3=unusable.";

/// System prompt for generation, extended with the user's style and a reference sample.
pub fn generation_system_prompt(
    style: Option<&StyleFingerprint>,
    sample: Option<&GoldenSample>,
) -> String {
    let mut prompt = GENERATION_BASE_PROMPT.to_string();

    if let Some(guidance) = style
        .map(StyleFingerprint::as_prompt_guidance)
        .filter(|g| !g.is_empty())
    {
        prompt.push_str(
            "\n\nUSER STYLE PREFERENCES (match these so documents stay consistent):\n",
        );
        prompt.push_str(&guidance);
    }

    if let Some(sample) = sample {
        prompt.push_str("\n\nREFERENCE EXAMPLE of a high-quality ");
        prompt.push_str(&sample.document_type);
        prompt.push_str(" (match its quality and structure, not its content):\n");
        prompt.push_str(truncate_chars(&sample.html, GOLDEN_SAMPLE_EXCERPT_CHARS));
    }

    prompt
}

/// The user turn for a generate or edit request.
pub fn generation_user_message(
    mode: GenerationMode,
    doc_type: Option<&str>,
    prompt: &str,
    current_html: Option<&str>,
) -> String {
    match (mode, current_html) {
        (GenerationMode::Edit, Some(html)) => format!(
            "Here is the current document HTML:\n\n{html}\n\nApply this edit: {prompt}\n\n\
             Return the complete updated document HTML, not just the changed part."
        ),
        _ => match doc_type.filter(|d| !d.trim().is_empty()) {
            Some(doc_type) => {
                format!("Generate a professional {doc_type} document. User request: {prompt}")
            }
            None => format!("Generate a professional document. User request: {prompt}"),
        },
    }
}

pub fn style_user_message(document_type: &str, html: &str) -> String {
    format!(
        "Extract the style fingerprint from this {document_type}:\n\n{}",
        truncate_chars(html, STYLE_EXCERPT_CHARS)
    )
}

pub fn evaluation_user_message(document_type: Option<&str>, prompt: Option<&str>, html: &str) -> String {
    format!(
        "Evaluate this {} (prompt: \"{}\"):\n\n{}",
        document_type.unwrap_or("document"),
        truncate_chars(prompt.unwrap_or_default(), EVALUATION_PROMPT_EXCERPT_CHARS),
        truncate_chars(html, EVALUATION_HTML_EXCERPT_CHARS)
    )
}
