//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from llm-mapper-core
    #[error("Core error: {0}")]
    Core(#[from] llm_mapper_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: expected {} format", path.display(), expected)]
    InvalidFormat { path: PathBuf, expected: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) | Self::TomlSerialize(_) => 14,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Extension trait for displaying errors with context
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, msg: &str) -> Result<T>;

    /// Add context with a closure (only evaluated on error)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other {
                message: format!("{}: {}", msg, inner),
            }
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other {
                message: format!("{}: {}", f(), inner),
            }
        })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let headline = if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    };

    // Transform defects carry the declaration that failed
    match error {
        Error::Core(llm_mapper_core::Error::Transform {
            mapper,
            direction,
            external_path,
            internal_path,
            ..
        }) => format!(
            "{}\n  mapper: {} ({})\n  declaration: {} <-> {}",
            headline, mapper, direction, external_path, internal_path
        ),
        _ => headline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_mapper_core::{Direction, TransformError};

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        assert_eq!(Error::config("bad").exit_code(), 5);
        assert_eq!(Error::invalid_args("bad").exit_code(), 6);
        assert_eq!(Error::other("bad").exit_code(), 99);
        assert_eq!(
            Error::FileNotFound {
                path: PathBuf::from("missing.json")
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn test_only_argument_errors_show_help() {
        assert!(Error::invalid_args("two inputs").should_show_help());
        assert!(!Error::config("bad").should_show_help());
    }

    #[test]
    fn test_context_wraps_message() {
        let failed: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = failed.context("Failed to write output").unwrap_err();
        assert_eq!(err.to_string(), "Failed to write output: IO error: denied");
    }

    #[test]
    fn test_format_transform_error_names_declaration() {
        let error = Error::Core(llm_mapper_core::Error::Transform {
            mapper: "anthropic-chat".to_string(),
            direction: Direction::ToInternal,
            external_path: "tool_choice".to_string(),
            internal_path: "tool_choice".to_string(),
            source: TransformError::MissingField {
                field: "tool_choice.name",
            },
        });

        let formatted = format_error(&error, false);
        assert!(formatted.starts_with("Error: Core error:"));
        assert!(formatted.contains("mapper: anthropic-chat (to_internal)"));
        assert!(formatted.contains("declaration: tool_choice <-> tool_choice"));
    }

    #[test]
    fn test_format_plain_error() {
        assert_eq!(
            format_error(&Error::config("unknown key"), false),
            "Error: Configuration error: unknown key"
        );
    }
}
