use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("date of birth {dob} is after date of testing {tested_on}")]
    BirthAfterTesting { dob: String, tested_on: String },
}
