//! Score → level classification with the current report terminology.
//!
//! Score tables still carry the legacy band names. Every classification
//! passes the legacy label through [`remap_legacy_label`], so reports always
//! show the current wording regardless of what the table returns.

use serde::{Deserialize, Serialize};

use clinrep_core::models::field::FieldValue;
use clinrep_core::normalize::normalize;

use crate::ScoreTable;
use crate::error::InstrumentError;

/// Label used when there is no usable score.
pub const NOT_APPLICABLE: &str = "N/A";

/// A derived level for one score. Computed fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Current report terminology.
    pub label: String,
    /// Band name as returned by the score table.
    pub legacy_label: String,
}

impl Classification {
    pub fn not_applicable() -> Self {
        Self {
            label: NOT_APPLICABLE.to_string(),
            legacy_label: NOT_APPLICABLE.to_string(),
        }
    }
}

/// Map a legacy band name to the current terminology.
pub fn remap_legacy_label(legacy: &str) -> String {
    if legacy == "Low performance" {
        "Low level of intelligence".to_string()
    } else if legacy == "Average of performance" {
        "Average level of intelligence".to_string()
    } else if legacy.contains("Borderline") {
        "Borderline level of intellectual functioning".to_string()
    } else {
        legacy.to_string()
    }
}

/// Parse a submitted score. `Ok(None)` when the field is absent or blank.
pub fn parse_score(raw: Option<&FieldValue>) -> Result<Option<f64>, InstrumentError> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return Ok(None);
    }
    match normalized.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(Some(score)),
        _ => Err(InstrumentError::NotANumber { raw: normalized }),
    }
}

/// Classify a numeric score against `table`.
pub fn classify_score(table: &dyn ScoreTable, score: f64) -> Classification {
    let legacy = table.legacy_label(score);
    Classification {
        label: remap_legacy_label(legacy),
        legacy_label: legacy.to_string(),
    }
}

/// Classify a submitted score field. Absent or non-numeric input is "N/A".
pub fn classify(table: &dyn ScoreTable, raw: Option<&FieldValue>) -> Classification {
    match parse_score(raw) {
        Ok(Some(score)) => classify_score(table, score),
        Ok(None) | Err(_) => Classification::not_applicable(),
    }
}
