use clinrep_core::models::field::FieldValue;
use clinrep_core::normalize::{is_flag_set, normalize, normalize_or, normalize_str};

#[test]
fn absent_value_is_empty() {
    assert_eq!(normalize(None), "");
}

#[test]
fn blank_text_is_empty() {
    assert_eq!(normalize(Some(&FieldValue::text("  "))), "");
    assert_eq!(normalize(Some(&FieldValue::text(""))), "");
}

#[test]
fn serialization_artifacts_are_empty() {
    assert_eq!(normalize_str("undefined"), "");
    assert_eq!(normalize_str("UNDEFINED"), "");
    assert_eq!(normalize_str(" Null "), "");
    assert_eq!(normalize_str("null"), "");
}

#[test]
fn text_is_trimmed() {
    assert_eq!(normalize(Some(&FieldValue::text(" Bob "))), "Bob");
}

#[test]
fn numbers_render_without_trailing_fraction() {
    assert_eq!(normalize(Some(&FieldValue::Number(95.0))), "95");
    assert_eq!(normalize(Some(&FieldValue::Number(12.5))), "12.5");
}

#[test]
fn lists_join_non_empty_items() {
    let list = FieldValue::List(vec![
        "Memory issues".to_string(),
        "  ".to_string(),
        " Poor handwriting ".to_string(),
        "undefined".to_string(),
    ]);
    assert_eq!(normalize(Some(&list)), "Memory issues, Poor handwriting");
}

#[test]
fn fallback_applies_only_when_empty() {
    assert_eq!(normalize_or(None, "N/A"), "N/A");
    assert_eq!(normalize_or(Some(&FieldValue::text("null")), "N/A"), "N/A");
    assert_eq!(normalize_or(Some(&FieldValue::text("9")), "N/A"), "9");
}

#[test]
fn flag_accepts_boolean_or_true_text() {
    assert!(is_flag_set(Some(&FieldValue::Flag(true))));
    assert!(is_flag_set(Some(&FieldValue::text("true"))));
    assert!(!is_flag_set(Some(&FieldValue::Flag(false))));
    assert!(!is_flag_set(Some(&FieldValue::text("false"))));
    assert!(!is_flag_set(Some(&FieldValue::text("yes"))));
    assert!(!is_flag_set(Some(&FieldValue::Number(1.0))));
    assert!(!is_flag_set(None));
}
