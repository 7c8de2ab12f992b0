//! clinrep-export
//!
//! Report assembly: placeholder vocabulary, replacement map, compiled
//! template rendering, template migration, and the PDF / Word export
//! adapters.

pub mod doc;
pub mod error;
pub mod migrate;
pub mod pdf;
pub mod placeholder;
pub mod render;
pub mod replacements;
pub mod styles;
pub mod template;
