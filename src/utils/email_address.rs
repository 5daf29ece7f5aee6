//! Email address normalization.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

/// Trims and lower-cases an address. Returns `None` when it is not a plausible address.
pub fn normalize_email(input: &str) -> Option<String> {
    let cleaned = input.trim().to_lowercase();
    EMAIL.is_match(&cleaned).then_some(cleaned)
}
