//! Narrative text normalization

use once_cell::sync::Lazy;
use regex::Regex;

use core_kernel::FieldValue;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s.]").expect("disallowed-character pattern is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Cleans raw narrative text
///
/// Every character other than ASCII letters, digits, whitespace and `.` is
/// replaced by a space; runs of whitespace collapse to one space, the
/// result is trimmed and lowercased.
pub fn clean_text(raw: &str) -> String {
    let replaced = DISALLOWED.replace_all(raw, " ");
    WHITESPACE_RUN
        .replace_all(&replaced, " ")
        .trim()
        .to_ascii_lowercase()
}

/// Cleans any field value; missing values give the empty string
///
/// Non-text values are cleaned through their textual representation.
pub fn normalize_field(value: Option<&FieldValue>) -> String {
    value
        .and_then(FieldValue::to_text)
        .map(|text| clean_text(&text))
        .unwrap_or_default()
}
