//! Shared value types and ambient plumbing for the bikedash workspace.
//!
//! Holds the typed record structs for the two rental tables, the validated
//! [`models::DateRange`], the workspace error enum, CLI settings with
//! persisted last-used parameters, and display formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
