//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies use camelCase keys like the browser client sends them. Required
//! fields are `Option`s checked with `validator`, so a missing field yields a 400
//! with a readable message instead of a deserialization rejection.

pub mod admin;
pub mod billing;
pub mod catalog;
pub mod email;
pub mod generate;
pub mod health;
pub mod session;
pub mod sitemap;
pub mod style;
pub mod training;

use regex::Regex;
use std::sync::LazyLock;

/// Canonical textual UUID.
pub(crate) static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid regex")
});

/// Turns blank strings into `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
