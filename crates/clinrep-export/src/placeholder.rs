//! The fixed placeholder vocabulary of the report template.
//!
//! Tokens are written `«Identifier»` in the template. The identifiers are
//! part of the stored template text, so they keep their historical spelling
//! (including `Summery` and the mixed-case quotient names).

use std::fmt;

pub const TOKEN_OPEN: char = '«';
pub const TOKEN_CLOSE: char = '»';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    Name,
    Gender,
    DateOfTesting,
    Class,
    DateOfBirth,
    Informant,
    Age,
    SchoolName,
    TestsAdministered,
    OtherTest,
    VerbalQuotient,
    Information,
    InformationLevel,
    ComprehensionLevel,
    ArithmeticLevel,
    SimilaritiesLevel,
    VocabularyLevel,
    OverallLevel,
    PerformanceQuotientLevel,
    OverallQuotient,
    PerformanceQuotient,
    NimhansDisplay,
    Summary,
    FinalLevel,
    HeShe,
    HimHer,
    HisHer,
    Complaints,
}

impl Placeholder {
    pub const ALL: [Placeholder; 28] = [
        Placeholder::Name,
        Placeholder::Gender,
        Placeholder::DateOfTesting,
        Placeholder::Class,
        Placeholder::DateOfBirth,
        Placeholder::Informant,
        Placeholder::Age,
        Placeholder::SchoolName,
        Placeholder::TestsAdministered,
        Placeholder::OtherTest,
        Placeholder::VerbalQuotient,
        Placeholder::Information,
        Placeholder::InformationLevel,
        Placeholder::ComprehensionLevel,
        Placeholder::ArithmeticLevel,
        Placeholder::SimilaritiesLevel,
        Placeholder::VocabularyLevel,
        Placeholder::OverallLevel,
        Placeholder::PerformanceQuotientLevel,
        Placeholder::OverallQuotient,
        Placeholder::PerformanceQuotient,
        Placeholder::NimhansDisplay,
        Placeholder::Summary,
        Placeholder::FinalLevel,
        Placeholder::HeShe,
        Placeholder::HimHer,
        Placeholder::HisHer,
        Placeholder::Complaints,
    ];

    /// Identifier between the guillemets.
    pub fn identifier(self) -> &'static str {
        match self {
            Placeholder::Name => "Name",
            Placeholder::Gender => "Gender",
            Placeholder::DateOfTesting => "Date_of_Testing",
            Placeholder::Class => "Class",
            Placeholder::DateOfBirth => "Date_of_Birth",
            Placeholder::Informant => "Informant",
            Placeholder::Age => "Age",
            Placeholder::SchoolName => "School_Name",
            Placeholder::TestsAdministered => "Tests_Administered",
            Placeholder::OtherTest => "Other_Test",
            Placeholder::VerbalQuotient => "Verbal_quotient",
            Placeholder::Information => "Information",
            Placeholder::InformationLevel => "Information_Level",
            Placeholder::ComprehensionLevel => "Comprehension_Level",
            Placeholder::ArithmeticLevel => "Arithmetic_Level",
            Placeholder::SimilaritiesLevel => "Similarities_Level",
            Placeholder::VocabularyLevel => "Vocabulary_Level",
            Placeholder::OverallLevel => "Overall_Level",
            Placeholder::PerformanceQuotientLevel => "performance_quotient_Level",
            Placeholder::OverallQuotient => "Overall_Quotient",
            Placeholder::PerformanceQuotient => "performance_quotient",
            Placeholder::NimhansDisplay => "nimhans_display",
            Placeholder::Summary => "Summery",
            Placeholder::FinalLevel => "Final_Level",
            Placeholder::HeShe => "he_she",
            Placeholder::HimHer => "him_her",
            Placeholder::HisHer => "his_her",
            Placeholder::Complaints => "Complaints",
        }
    }

    /// The full token as it appears in the template, e.g. `«Name»`.
    pub fn token(self) -> String {
        format!("{TOKEN_OPEN}{}{TOKEN_CLOSE}", self.identifier())
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.identifier() == identifier)
    }

    /// Raw placeholders are inserted without HTML escaping. Only placeholders
    /// whose values come from a fixed set of literals may be raw.
    pub fn is_raw(self) -> bool {
        matches!(self, Placeholder::NimhansDisplay)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TOKEN_OPEN}{}{TOKEN_CLOSE}", self.identifier())
    }
}

/// Whether `identifier` has the shape of a placeholder name.
pub fn is_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
