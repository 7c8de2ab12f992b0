//! clinrep-core
//!
//! Pure domain types for a single report submission: the submitted fields,
//! value normalization, pronoun resolution and age derivation.
//! No I/O. This is the shared vocabulary of the clinrep workspace.

pub mod age;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pronouns;
