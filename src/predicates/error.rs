use thiserror::Error;

use super::PredicateKind;

/// Errors produced while constructing predicates from user input.
///
/// These are usage errors: they are detected before any file is examined and
/// abort the whole run.
#[derive(Debug, Error)]
pub enum PredicateError {
    /// Empty pattern is invalid
    #[error("Empty {kind} pattern provided")]
    InvalidEmpty { kind: PredicateKind },
    /// Regex failed to compile
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },
    /// Field filter is not of the form `key:pattern`
    #[error("Invalid field filter '{spec}': {reason}")]
    InvalidFieldSpec { spec: String, reason: String },
    /// Date boundary is not a `YYYY-MM-DD` calendar date
    #[error("Invalid date '{value}' for {flag}: expected YYYY-MM-DD")]
    InvalidDate { flag: &'static str, value: String },
    /// Too many patterns were provided
    #[error("Too many patterns provided: {provided} (max {max})")]
    TooManyPatterns { provided: usize, max: usize },
}

impl PredicateError {
    #[must_use]
    pub fn regex_compile(pattern: &str, reason: &str) -> Self {
        Self::InvalidRegex {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn field_spec(spec: &str, reason: &str) -> Self {
        Self::InvalidFieldSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        }
    }
}
