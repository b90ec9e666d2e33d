//! Error types for Vigil.
//!
//! Uses thiserror for structured errors with context. Two disjoint classes
//! exist by design:
//! - Configuration errors (bad directive, bad register pattern, missing rule)
//!   abort the current validation call and surface as `Err` values here.
//! - Value failures (a candidate value flunking a check) are data: they land
//!   in the [`ErrorCollector`](crate::core::collector::ErrorCollector) and
//!   never abort the run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for Vigil.
///
/// This enum encompasses all configuration-error categories and enables
/// automatic conversion between specific error types.
#[derive(Error, Debug)]
pub enum VigilError {
    #[error("Directive error: {0}")]
    Directive(#[from] DirectiveError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Collector error: {0}")]
    Collector(#[from] CollectorError),
}

/// Errors from parsing a directive string.
///
/// A directive that fails to parse indicates broken setup rather than a bad
/// value, so these are fatal to the validation call that triggered the parse.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectiveError {
    #[error("Unrecognized directive '{0}': expected type(...), match(...) or replace(...)")]
    Unrecognized(String),

    #[error("Directive '{0}' was not formatted correctly")]
    Malformed(String),

    #[error("No declared type found in directive '{0}'")]
    EmptyType(String),

    #[error("Unknown declared type '{declared}' in directive '{directive}'")]
    UnknownType { directive: String, declared: String },

    #[error("Invalid pattern in directive '{directive}': {reason}")]
    InvalidPattern { directive: String, reason: String },

    #[error("Replace directive '{0}' is missing a replacement")]
    MissingReplacement(String),
}

/// Errors from registering or resolving validation rules.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryError {
    #[error("Rule pattern '{pattern}' was not formatted correctly: {reason}")]
    MalformedPattern { pattern: String, reason: String },

    #[error("A name was not provided for rule pattern '{0}': hook registrations need a name, e.g. before.string:password")]
    MissingHookName(String),

    #[error("No validation rules registered for type '{0}'")]
    RuleNotFound(String),

    #[error("No main rule chain registered for type '{0}'")]
    EmptyMainChain(String),

    #[error("Registry is shared and can no longer accept registrations")]
    Frozen,
}

/// Errors from reading the error collector.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectorError {
    #[error("No validation errors recorded for field '{0}'")]
    NoSuchField(String),
}

/// Result type alias for Vigil operations.
pub type VigilResult<T> = Result<T, VigilError>;

/// Result type alias for directive parsing.
pub type ParseResult<T> = Result<T, DirectiveError>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_error_display() {
        let err = DirectiveError::UnknownType {
            directive: "type(decimal)".to_string(),
            declared: "decimal".to_string(),
        };
        assert!(err.to_string().contains("decimal"));

        let err = DirectiveError::Unrecognized("frobnicate(x)".to_string());
        assert!(err.to_string().contains("frobnicate(x)"));
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::MissingHookName("before.string".to_string());
        assert!(err.to_string().contains("before.string:password"));
    }

    #[test]
    fn test_error_conversion() {
        let err: VigilError = DirectiveError::EmptyType("type()".to_string()).into();
        assert!(matches!(err, VigilError::Directive(_)));

        let err: VigilError = RegistryError::RuleNotFound("string".to_string()).into();
        assert!(matches!(err, VigilError::Registry(_)));
    }
}
