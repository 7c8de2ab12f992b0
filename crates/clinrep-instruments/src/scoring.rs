use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Defines the valid range for a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One classification band: every score at or above `min` (and below the
/// next band's `min`) carries `legacy_label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LevelBand {
    pub min: f64,
    pub legacy_label: String,
}

impl LevelBand {
    pub fn new(min: f64, legacy_label: &str) -> Self {
        Self {
            min,
            legacy_label: legacy_label.to_string(),
        }
    }
}
