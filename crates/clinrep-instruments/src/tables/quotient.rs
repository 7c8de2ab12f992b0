use crate::ScoreTable;
use crate::scoring::{LevelBand, ScoreRange};

/// Intelligence/test quotient bands (mean 100, SD 15).
/// Used for the overall and performance quotients as well as the
/// individual subtest quotients on the report.
pub struct QuotientTable;

impl ScoreTable for QuotientTable {
    fn id(&self) -> &str {
        "quotient"
    }

    fn valid_range(&self) -> ScoreRange {
        ScoreRange {
            min: 0.0,
            max: 200.0,
        }
    }

    fn bands(&self) -> &[LevelBand] {
        static BANDS: std::sync::LazyLock<Vec<LevelBand>> = std::sync::LazyLock::new(|| {
            vec![
                LevelBand::new(130.0, "Very superior"),
                LevelBand::new(120.0, "Superior"),
                LevelBand::new(110.0, "High average"),
                LevelBand::new(90.0, "Average of performance"),
                LevelBand::new(80.0, "Low performance"),
                LevelBand::new(70.0, "Borderline intelligence"),
                LevelBand::new(50.0, "Mild intellectual disability"),
                LevelBand::new(35.0, "Moderate intellectual disability"),
                LevelBand::new(20.0, "Severe intellectual disability"),
                LevelBand::new(0.0, "Profound intellectual disability"),
            ]
        });
        &BANDS
    }
}
