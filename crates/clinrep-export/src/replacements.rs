use std::collections::BTreeMap;

use clinrep_core::age::completed_years;
use clinrep_core::models::field::FieldValue;
use clinrep_core::models::submission::Submission;
use clinrep_core::normalize::{is_flag_set, normalize, normalize_or};
use clinrep_core::pronouns;
use clinrep_instruments::ScoreTable;
use clinrep_instruments::level::{self, NOT_APPLICABLE};

use crate::placeholder::Placeholder;

/// Choice-field value meaning "use the paired free-text field instead".
const OTHER_CHOICE: &str = "Other";

pub const DISPLAY_BLOCK: &str = "block";
pub const DISPLAY_NONE: &str = "none";

/// Placeholder → value mapping for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementMap {
    values: BTreeMap<Placeholder, String>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, placeholder: Placeholder, value: impl Into<String>) {
        self.values.insert(placeholder, value.into());
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Vocabulary entries with no value.
    pub fn missing(&self) -> Vec<Placeholder> {
        Placeholder::ALL
            .into_iter()
            .filter(|p| !self.values.contains_key(p))
            .collect()
    }
}

/// Build the complete replacement map for a submission.
///
/// Never fails: absent fields become empty strings, or "N/A" where the
/// report needs an explicit marker.
pub fn build_replacements(submission: &Submission, table: &dyn ScoreTable) -> ReplacementMap {
    let s = submission;
    let mut map = ReplacementMap::new();

    // Identity
    map.insert(Placeholder::Name, normalize(s.name.as_ref()));
    map.insert(Placeholder::Gender, normalize(s.gender.as_ref()));
    map.insert(Placeholder::DateOfTesting, normalize(s.date_of_testing.as_ref()));
    map.insert(Placeholder::Class, normalize(s.class.as_ref()));
    map.insert(Placeholder::DateOfBirth, normalize(s.dob.as_ref()));
    map.insert(
        Placeholder::Informant,
        with_other(s.informant.as_ref(), s.other_informant.as_ref()),
    );
    map.insert(Placeholder::Age, age(s));
    map.insert(
        Placeholder::SchoolName,
        with_other(s.school.as_ref(), s.other_school.as_ref()),
    );

    // Test information
    map.insert(
        Placeholder::TestsAdministered,
        normalize(s.tests_administered.as_ref()),
    );
    map.insert(Placeholder::OtherTest, normalize(s.other_test.as_ref()));
    map.insert(Placeholder::VerbalQuotient, normalize(s.verbal_quotient.as_ref()));

    // Scores and levels
    map.insert(
        Placeholder::Information,
        normalize_or(s.information.as_ref(), NOT_APPLICABLE),
    );
    map.insert(
        Placeholder::InformationLevel,
        level_of(table, Placeholder::InformationLevel, s.information.as_ref()),
    );
    map.insert(
        Placeholder::ComprehensionLevel,
        level_of(table, Placeholder::ComprehensionLevel, s.comprehension.as_ref()),
    );
    map.insert(
        Placeholder::ArithmeticLevel,
        level_of(table, Placeholder::ArithmeticLevel, s.arithmetic.as_ref()),
    );
    map.insert(
        Placeholder::SimilaritiesLevel,
        level_of(table, Placeholder::SimilaritiesLevel, s.similarities.as_ref()),
    );
    map.insert(
        Placeholder::VocabularyLevel,
        level_of(table, Placeholder::VocabularyLevel, vocabulary_score(s)),
    );
    map.insert(
        Placeholder::OverallLevel,
        level_of(table, Placeholder::OverallLevel, s.overall_quotient.as_ref()),
    );
    map.insert(
        Placeholder::PerformanceQuotientLevel,
        level_of(
            table,
            Placeholder::PerformanceQuotientLevel,
            s.performance_quotient.as_ref(),
        ),
    );
    map.insert(
        Placeholder::OverallQuotient,
        normalize(s.overall_quotient.as_ref()),
    );
    map.insert(
        Placeholder::PerformanceQuotient,
        normalize(s.performance_quotient.as_ref()),
    );

    // Display rules and summary
    map.insert(
        Placeholder::NimhansDisplay,
        if is_flag_set(s.show_nimhans.as_ref()) {
            DISPLAY_BLOCK
        } else {
            DISPLAY_NONE
        },
    );
    map.insert(Placeholder::Summary, normalize(s.summary.as_ref()));
    map.insert(Placeholder::Complaints, normalize(s.complaints.as_ref()));
    // Same score as Overall_Level, classified again for the closing section.
    map.insert(
        Placeholder::FinalLevel,
        level_of(table, Placeholder::FinalLevel, s.overall_quotient.as_ref()),
    );

    // Pronouns
    let pronouns = pronouns::resolve_for(s);
    map.insert(Placeholder::HeShe, pronouns.he_she);
    map.insert(Placeholder::HimHer, pronouns.him_her);
    map.insert(Placeholder::HisHer, pronouns.his_her);

    map
}

fn level_of(table: &dyn ScoreTable, placeholder: Placeholder, raw: Option<&FieldValue>) -> String {
    if let Ok(Some(score)) = level::parse_score(raw)
        && let Err(e) = table.check_range(score)
    {
        tracing::warn!(placeholder = %placeholder, error = %e, "score outside normed range");
    }
    level::classify(table, raw).label
}

fn with_other(choice: Option<&FieldValue>, other: Option<&FieldValue>) -> String {
    let chosen = normalize(choice);
    if chosen == OTHER_CHOICE {
        normalize(other)
    } else {
        chosen
    }
}

/// The form collects either Vocabulary or Digit Span for the same slot.
fn vocabulary_score(s: &Submission) -> Option<&FieldValue> {
    if normalize(s.vocabulary.as_ref()).is_empty() {
        s.digit_span.as_ref()
    } else {
        s.vocabulary.as_ref()
    }
}

fn age(s: &Submission) -> String {
    let given = normalize(s.age.as_ref());
    if !given.is_empty() {
        return given;
    }

    let dob = normalize(s.dob.as_ref());
    let tested_on = normalize(s.date_of_testing.as_ref());
    if dob.is_empty() || tested_on.is_empty() {
        return String::new();
    }

    match completed_years(&dob, &tested_on) {
        Ok(years) => years.to_string(),
        // Dates are patient data; log only that derivation failed.
        Err(_) => {
            tracing::debug!("could not derive age from dates");
            String::new()
        }
    }
}
