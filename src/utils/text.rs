//! Character-safe string helpers.

/// Returns at most `max_chars` characters of `s`, never splitting a UTF-8 sequence.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Part of an email address before `@`, used as a fallback display name.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
