//! Clean-up of model-generated HTML.

use regex::Regex;
use std::sync::LazyLock;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z]*").expect("valid regex"));
static DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!DOCTYPE[^>]*>").expect("valid regex"));
static HEAD_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head\b[^>]*>.*?</head>").expect("valid regex"));
static WRAPPER_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(?:html|body)\b[^>]*>").expect("valid regex"));
static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));

/// Removes Markdown code fences (```` ``` ```` and ```` ```json ```` etc).
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Reduces a model reply to a bare document body.
///
/// Strips code fences, the doctype, `<head>` and `<html>`/`<body>` wrappers and any
/// `<script>` blocks, then trims.
pub fn clean_generated_html(raw: &str) -> String {
    let html = CODE_FENCE.replace_all(raw, "");
    let html = DOCTYPE.replace_all(&html, "");
    let html = HEAD_BLOCK.replace_all(&html, "");
    let html = WRAPPER_TAGS.replace_all(&html, "");
    let html = SCRIPT_BLOCK.replace_all(&html, "");
    html.trim().to_string()
}
