//! Error types for problem loading.
//!
//! The learning core itself never fails; errors only arise when a host
//! hands in a problem definition from outside.

use thiserror::Error;

use crate::validation::ValidationError;

/// Failure to load a problem definition.
#[derive(Error, Debug)]
pub enum ProblemError {
    /// The definition parsed but failed validation.
    #[error("invalid problem definition: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),

    /// The definition is not well-formed JSON for a problem.
    #[error("failed to parse problem definition: {0}")]
    Parse(#[from] serde_json::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
