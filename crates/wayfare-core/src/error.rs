//! Error types for the wayfare library.
//!
//! The schedule pipeline itself never fails; every variant here belongs to
//! the collaborators around it (storage, the generation service, input
//! validation at the service boundary).

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all wayfare operations.
#[derive(Error, Debug)]
pub enum WayfareError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Survey not found for the given ID
    #[error("Survey with ID {id} not found")]
    SurveyNotFound { id: u64 },
    /// Recommendation not found for the given ID
    #[error("Recommendation with ID {id} not found")]
    RecommendationNotFound { id: u64 },
    /// The resource exists but belongs to someone else
    #[error("Access to {resource} {id} is forbidden")]
    Forbidden { resource: &'static str, id: u64 },
    /// The generation service could not be reached or returned no content
    #[error("Generation service unavailable: {message}")]
    GenerationUnavailable { message: String },
    /// The generation service answered with something that is not valid JSON
    #[error("Malformed generation response: {source}")]
    MalformedGeneration {
        #[source]
        source: serde_json::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> WayfareError {
        WayfareError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> WayfareError {
        WayfareError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl WayfareError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a transport-level failure of the generation service.
    pub fn unavailable(message: impl fmt::Display) -> Self {
        Self::GenerationUnavailable {
            message: message.to_string(),
        }
    }

    /// Wraps a background task failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// True for the two generation failure kinds.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Self::GenerationUnavailable { .. } | Self::MalformedGeneration { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| WayfareError::database(message).with_source(e))
    }
}

/// Result type alias for wayfare operations
pub type Result<T> = std::result::Result<T, WayfareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_failure_kinds_are_distinct() {
        let unavailable = WayfareError::unavailable("connection refused");
        let malformed = WayfareError::MalformedGeneration {
            source: serde_json::from_str::<serde_json::Value>("{oops").unwrap_err(),
        };

        assert!(unavailable.is_generation_failure());
        assert!(malformed.is_generation_failure());
        assert!(unavailable.to_string().starts_with("Generation service unavailable"));
        assert!(malformed.to_string().starts_with("Malformed generation response"));
        assert!(!WayfareError::SurveyNotFound { id: 1 }.is_generation_failure());
    }

    #[test]
    fn test_invalid_input_builder() {
        let error = WayfareError::invalid_input("rating").with_reason("must be between 1 and 5");
        assert_eq!(
            error.to_string(),
            "Invalid input for field 'rating': must be between 1 and 5"
        );
    }
}
