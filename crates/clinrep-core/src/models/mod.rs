pub mod field;
pub mod submission;
