use clinrep_core::models::field::FieldValue;
use clinrep_instruments::ScoreTable;
use clinrep_instruments::error::InstrumentError;
use clinrep_instruments::level::{
    classify, classify_score, parse_score, remap_legacy_label, Classification,
};
use clinrep_instruments::scoring::{LevelBand, ScoreRange};
use clinrep_instruments::tables::quotient::QuotientTable;

/// Table returning one fixed legacy label, to exercise the remap in isolation.
struct FixedLabel(&'static str);

impl ScoreTable for FixedLabel {
    fn id(&self) -> &str {
        "fixed"
    }

    fn valid_range(&self) -> ScoreRange {
        ScoreRange {
            min: 0.0,
            max: 200.0,
        }
    }

    fn bands(&self) -> &[LevelBand] {
        &[]
    }

    fn legacy_label(&self, _score: f64) -> &str {
        self.0
    }
}

#[test]
fn remap_replaces_legacy_terminology() {
    assert_eq!(remap_legacy_label("Low performance"), "Low level of intelligence");
    assert_eq!(
        remap_legacy_label("Average of performance"),
        "Average level of intelligence"
    );
    assert_eq!(
        remap_legacy_label("Borderline intelligence"),
        "Borderline level of intellectual functioning"
    );
    assert_eq!(
        remap_legacy_label("Borderline"),
        "Borderline level of intellectual functioning"
    );
}

#[test]
fn remap_is_exact_for_low_and_average() {
    assert_eq!(remap_legacy_label("low performance"), "low performance");
    assert_eq!(remap_legacy_label("Superior"), "Superior");
}

#[test]
fn remap_applies_on_every_classification() {
    let table = FixedLabel("Low performance");
    for score in ["70", "85", "120"] {
        let result = classify(&table, Some(&FieldValue::text(score)));
        assert_eq!(result.label, "Low level of intelligence");
        assert_eq!(result.legacy_label, "Low performance");
    }
}

#[test]
fn absent_or_blank_score_is_not_applicable() {
    let table = QuotientTable;
    assert_eq!(classify(&table, None), Classification::not_applicable());
    assert_eq!(
        classify(&table, Some(&FieldValue::text("  "))),
        Classification::not_applicable()
    );
    assert_eq!(
        classify(&table, Some(&FieldValue::text("undefined"))).label,
        "N/A"
    );
}

#[test]
fn non_numeric_score_is_not_applicable() {
    let table = QuotientTable;
    assert_eq!(classify(&table, Some(&FieldValue::text("abc"))).label, "N/A");
    assert_eq!(classify(&table, Some(&FieldValue::text("NaN"))).label, "N/A");
    assert!(matches!(
        parse_score(Some(&FieldValue::text("inf"))),
        Err(InstrumentError::NotANumber { .. })
    ));
}

#[test]
fn quotient_bands_follow_thresholds() {
    let table = QuotientTable;
    let label = |score: f64| classify_score(&table, score).label;

    assert_eq!(label(135.0), "Very superior");
    assert_eq!(label(130.0), "Very superior");
    assert_eq!(label(129.0), "Superior");
    assert_eq!(label(112.0), "High average");
    assert_eq!(label(100.0), "Average level of intelligence");
    assert_eq!(label(90.0), "Average level of intelligence");
    assert_eq!(label(85.0), "Low level of intelligence");
    assert_eq!(label(75.0), "Borderline level of intellectual functioning");
    assert_eq!(label(60.0), "Mild intellectual disability");
    assert_eq!(label(40.0), "Moderate intellectual disability");
    assert_eq!(label(25.0), "Severe intellectual disability");
    assert_eq!(label(10.0), "Profound intellectual disability");
    assert_eq!(label(-5.0), "Profound intellectual disability");
}

#[test]
fn numeric_field_values_classify_like_text() {
    let table = QuotientTable;
    assert_eq!(
        classify(&table, Some(&FieldValue::Number(85.0))),
        classify(&table, Some(&FieldValue::text(" 85 ")))
    );
}

#[test]
fn range_check_reports_out_of_range_scores() {
    let table = QuotientTable;
    assert!(table.check_range(100.0).is_ok());
    assert!(matches!(
        table.check_range(250.0),
        Err(InstrumentError::OutOfRange { .. })
    ));
}

#[test]
fn range_bounds_are_inclusive() {
    let range = QuotientTable.valid_range();
    assert!(range.contains(0.0));
    assert!(range.contains(200.0));
    assert!(!range.contains(-0.5));
    assert!(!range.contains(200.5));
}
