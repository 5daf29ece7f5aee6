//! Request metadata read from proxy headers.

use axum::http::{HeaderMap, header};

/// Best-effort client address: first `X-Forwarded-For` entry, then `X-Real-IP`.
///
/// Returns `"unknown"` when neither header is usable.
pub fn client_ip_from_headers(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .unwrap_or("unknown")
        .to_string()
}

/// The `Origin` header, or `fallback` when absent.
pub fn origin_or(headers: &HeaderMap, fallback: &str) -> String {
    headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && *v != "null")
        .unwrap_or(fallback)
        .trim_end_matches('/')
        .to_string()
}
