use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::field::FieldValue;

/// One report-generation request as captured by the assessment form.
///
/// Field names follow the form's wire names exactly, including the legacy
/// capitalized subtest names. Every field is optional: missing values
/// degrade to empty or "N/A" placeholders instead of failing the render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Submission {
    // Identity
    pub name: Option<FieldValue>,
    pub gender: Option<FieldValue>,
    pub dob: Option<FieldValue>,
    pub date_of_testing: Option<FieldValue>,
    pub age: Option<FieldValue>,
    pub class: Option<FieldValue>,
    pub informant: Option<FieldValue>,
    pub other_informant: Option<FieldValue>,
    pub school: Option<FieldValue>,
    pub other_school: Option<FieldValue>,

    // Test information
    #[serde(rename = "testsadministered")]
    pub tests_administered: Option<FieldValue>,
    pub other_test: Option<FieldValue>,

    // Verbal subtests
    pub verbal_quotient: Option<FieldValue>,
    #[serde(rename = "Information")]
    pub information: Option<FieldValue>,
    #[serde(rename = "Comprehension")]
    pub comprehension: Option<FieldValue>,
    #[serde(rename = "Arithmetic")]
    pub arithmetic: Option<FieldValue>,
    #[serde(rename = "Similarities")]
    pub similarities: Option<FieldValue>,
    #[serde(rename = "Vocabulary")]
    pub vocabulary: Option<FieldValue>,
    #[serde(rename = "DigitSpan")]
    pub digit_span: Option<FieldValue>,

    // Quotients
    pub overall_quotient: Option<FieldValue>,
    pub performance_quotient: Option<FieldValue>,

    // Free text and display flags
    pub summary: Option<FieldValue>,
    pub complaints: Option<FieldValue>,
    pub show_nimhans: Option<FieldValue>,

    // Explicit pronoun overrides
    #[serde(rename = "he_she")]
    pub he_she: Option<FieldValue>,
    #[serde(rename = "him_her")]
    pub him_her: Option<FieldValue>,
    #[serde(rename = "his_her")]
    pub his_her: Option<FieldValue>,
}

impl Submission {
    pub fn from_json(body: &[u8]) -> Result<Self, crate::error::CoreError> {
        Ok(serde_json::from_slice(body)?)
    }
}
