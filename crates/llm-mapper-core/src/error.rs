//! Error types for the llm-mapper core library
//!
//! Absence of a source field and structural mismatches are not errors (they
//! surface as [`MappingOutcome`](crate::mapping::MappingOutcome) values). The
//! only loud failure of a conversion is a transform defect, which is carried
//! by [`Error::Transform`] together with the mapping it came from.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Main error type for llm-mapper operations
#[derive(Error, Debug)]
pub enum Error {
    /// A transform function rejected its input
    #[error("Transform failed in mapper '{mapper}' ({direction}) for {external_path} <-> {internal_path}: {source}")]
    Transform {
        mapper: String,
        direction: Direction,
        external_path: String,
        internal_path: String,
        #[source]
        source: TransformError,
    },

    /// No mapper registered under the requested name
    #[error("Unknown mapper: {name}")]
    UnknownMapper {
        name: String,
    },

    /// No provider integration under the requested name
    #[error("Unknown provider: {name} (available: {available})")]
    UnknownProvider {
        name: String,
        available: String,
    },

    /// The mapped value could not be read as the canonical schema
    #[error("Canonical schema error in {section}: {source}")]
    Schema {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by transform functions
///
/// Transform authors return these when a value violates the shape their
/// transform assumes. The engine never recovers from them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The value had the wrong JSON type
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: String,
    },

    /// An enum-like field carried a value the transform does not know
    #[error("unknown {field} value: {value}")]
    UnknownVariant {
        field: &'static str,
        value: String,
    },

    /// A field the transform depends on was missing
    #[error("missing required field '{field}'")]
    MissingField {
        field: &'static str,
    },

    /// Free-form failure
    #[error("{0}")]
    Custom(String),
}

impl TransformError {
    /// Build an [`TransformError::UnexpectedShape`] naming the JSON type found
    pub fn unexpected(expected: &'static str, found: &serde_json::Value) -> Self {
        Self::UnexpectedShape {
            expected,
            found: json_type_name(found).to_string(),
        }
    }
}

/// Conversion direction of a mapper run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Provider shape to canonical shape
    ToInternal,
    /// Canonical shape to provider shape
    ToExternal,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToInternal => write!(f, "to_internal"),
            Direction::ToExternal => write!(f, "to_external"),
        }
    }
}

/// Name of a JSON value's type, for error messages
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transform_error_display() {
        let err = Error::Transform {
            mapper: "anthropic-chat".to_string(),
            direction: Direction::ToInternal,
            external_path: "tool_choice".to_string(),
            internal_path: "tool_choice".to_string(),
            source: TransformError::UnknownVariant {
                field: "tool_choice.type",
                value: "sometimes".to_string(),
            },
        };
        let text = err.to_string();
        assert!(text.contains("anthropic-chat"));
        assert!(text.contains("to_internal"));
        assert!(text.contains("unknown tool_choice.type value: sometimes"));
    }

    #[test]
    fn test_unexpected_names_json_type() {
        let err = TransformError::unexpected("array", &json!({"a": 1}));
        assert_eq!(err.to_string(), "expected array, found object");
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::ToInternal.to_string(), "to_internal");
        assert_eq!(Direction::ToExternal.to_string(), "to_external");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Json { .. }));
    }
}
