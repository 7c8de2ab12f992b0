//! clinrep-instruments
//!
//! Score classification for assessment reports. Pure data, no I/O.
//! A [`ScoreTable`] maps a numeric score to a legacy band label; the
//! [`level`] module turns that into the current report terminology.

pub mod error;
pub mod level;
pub mod scoring;
pub mod tables;

use error::InstrumentError;
use scoring::{LevelBand, ScoreRange};

/// Trait implemented by each score classification table.
pub trait ScoreTable: Send + Sync {
    /// Unique identifier for this table (e.g., "quotient").
    fn id(&self) -> &str;

    /// Range of scores the table was normed for.
    fn valid_range(&self) -> ScoreRange;

    /// Bands ordered from the highest lower bound to the lowest.
    fn bands(&self) -> &[LevelBand];

    /// Legacy label of the band containing `score`.
    ///
    /// Scores below the lowest bound fall into the lowest band, so the
    /// lookup is total for any finite score.
    fn legacy_label(&self, score: f64) -> &str {
        let bands = self.bands();
        bands
            .iter()
            .find(|band| score >= band.min)
            .or(bands.last())
            .map(|band| band.legacy_label.as_str())
            .unwrap_or(level::NOT_APPLICABLE)
    }

    /// Check `score` against [`ScoreTable::valid_range`].
    fn check_range(&self, score: f64) -> Result<(), InstrumentError> {
        let range = self.valid_range();
        if range.contains(score) {
            Ok(())
        } else {
            Err(InstrumentError::OutOfRange {
                table_id: self.id().to_string(),
                value: score,
                min: range.min,
                max: range.max,
            })
        }
    }
}
