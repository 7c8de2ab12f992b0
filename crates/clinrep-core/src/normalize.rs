//! Submitted-value normalization.
//!
//! Upstream serialization sometimes turns a missing field into the literal
//! text "undefined" or "null"; those are treated exactly like an absent value.

use crate::models::field::FieldValue;

/// Normalize an optional submitted value to a trimmed string.
///
/// Absent values, blank text and the case-insensitive literals `undefined`
/// and `null` all normalize to `""`. Lists normalize item by item, drop
/// empty items and join with `", "`.
pub fn normalize(value: Option<&FieldValue>) -> String {
    match value {
        None => String::new(),
        Some(FieldValue::Text(s)) => normalize_str(s),
        Some(FieldValue::Number(n)) => normalize_str(&n.to_string()),
        Some(FieldValue::Flag(b)) => b.to_string(),
        Some(FieldValue::List(items)) => items
            .iter()
            .map(|item| normalize_str(item))
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Normalize a raw string. See [`normalize`].
pub fn normalize_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("undefined") || trimmed.eq_ignore_ascii_case("null") {
        return String::new();
    }
    trimmed.to_string()
}

/// Normalize, substituting `fallback` when the result is empty.
pub fn normalize_or(value: Option<&FieldValue>, fallback: &str) -> String {
    let normalized = normalize(value);
    if normalized.is_empty() {
        fallback.to_string()
    } else {
        normalized
    }
}

/// Truthiness of a display flag: boolean `true` or the text `"true"`.
/// Anything else, including absence, is false.
pub fn is_flag_set(value: Option<&FieldValue>) -> bool {
    match value {
        Some(FieldValue::Flag(b)) => *b,
        Some(FieldValue::Text(s)) => s.trim() == "true",
        _ => false,
    }
}
