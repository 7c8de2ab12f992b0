//! clinrep-cli
//!
//! Operator commands that run without the HTTP server: migrating a report
//! template in place and rendering a saved submission to a file.

pub mod commands;
