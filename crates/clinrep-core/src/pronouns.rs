//! Pronoun resolution for report prose.
//!
//! Three-way default: `female` → she/her/her, `other` → they/them/their,
//! anything else (including no gender at all) → he/him/his. Each pronoun can
//! be overridden individually by the submitter.

use serde::{Deserialize, Serialize};

use crate::models::field::FieldValue;
use crate::models::submission::Submission;
use crate::normalize::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronouns {
    pub he_she: String,
    pub him_her: String,
    pub his_her: String,
}

/// Explicit per-pronoun overrides. Empty strings count as "not overridden".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronounOverrides {
    pub he_she: Option<String>,
    pub him_her: Option<String>,
    pub his_her: Option<String>,
}

impl PronounOverrides {
    pub fn from_submission(submission: &Submission) -> Self {
        Self {
            he_she: non_empty(submission.he_she.as_ref()),
            him_her: non_empty(submission.him_her.as_ref()),
            his_her: non_empty(submission.his_her.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PronounSet {
    Female,
    Other,
    Default,
}

impl PronounSet {
    fn from_gender(gender: &str) -> Self {
        if gender.eq_ignore_ascii_case("female") {
            PronounSet::Female
        } else if gender.eq_ignore_ascii_case("other") {
            PronounSet::Other
        } else {
            PronounSet::Default
        }
    }

    fn subject(self) -> &'static str {
        match self {
            PronounSet::Female => "she",
            PronounSet::Other => "they",
            PronounSet::Default => "he",
        }
    }

    fn object(self) -> &'static str {
        match self {
            PronounSet::Female => "her",
            PronounSet::Other => "them",
            PronounSet::Default => "him",
        }
    }

    fn possessive(self) -> &'static str {
        match self {
            PronounSet::Female => "her",
            PronounSet::Other => "their",
            PronounSet::Default => "his",
        }
    }
}

/// Resolve the pronoun set for `gender`, letting non-empty overrides win.
pub fn resolve(gender: &str, overrides: &PronounOverrides) -> Pronouns {
    let set = PronounSet::from_gender(gender.trim());
    let pick = |over: &Option<String>, derived: &str| match over.as_deref().map(str::trim) {
        Some(explicit) if !explicit.is_empty() => explicit.to_string(),
        _ => derived.to_string(),
    };

    Pronouns {
        he_she: pick(&overrides.he_she, set.subject()),
        him_her: pick(&overrides.him_her, set.object()),
        his_her: pick(&overrides.his_her, set.possessive()),
    }
}

/// Resolve pronouns straight from a submission's gender and override fields.
pub fn resolve_for(submission: &Submission) -> Pronouns {
    let gender = normalize(submission.gender.as_ref());
    resolve(&gender, &PronounOverrides::from_submission(submission))
}

fn non_empty(value: Option<&FieldValue>) -> Option<String> {
    let normalized = normalize(value);
    (!normalized.is_empty()).then_some(normalized)
}
