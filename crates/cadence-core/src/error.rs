//! Error types for the scheduling engine.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all engine operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// File system errors while saving or loading snapshots
    #[error("Persistence error at path '{path}': {source}")]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Snapshot or payload (de)serialization errors
    #[error("Serialization error at path '{path}': {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// A blocking task could not be joined
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builder for creating persistence errors with path context.
pub struct PersistenceErrorBuilder {
    path: PathBuf,
}

impl PersistenceErrorBuilder {
    /// Create a new persistence error builder for a path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Build the error with the given I/O source.
    pub fn with_source(self, source: std::io::Error) -> PlannerError {
        PlannerError::Persistence {
            path: self.path,
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
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for persistence errors.
    pub fn persistence(path: impl Into<PathBuf>) -> PersistenceErrorBuilder {
        PersistenceErrorBuilder::new(path)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Returns true for errors raised while reading or writing snapshots.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            PlannerError::Persistence { .. } | PlannerError::Serialization { .. }
        )
    }
}

/// Extension trait for I/O results that attaches the path being accessed.
pub trait PersistenceResultExt<T> {
    /// Map an I/O error into a [`PlannerError::Persistence`] for `path`.
    fn persist_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> PersistenceResultExt<T> for std::result::Result<T, std::io::Error> {
    fn persist_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| PlannerError::persistence(path).with_source(e))
    }
}

/// Extension trait for JSON results that attaches the path being accessed.
pub trait SerializationResultExt<T> {
    /// Map a serde_json error into a [`PlannerError::Serialization`] for `path`.
    fn serde_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> SerializationResultExt<T> for std::result::Result<T, serde_json::Error> {
    fn serde_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| PlannerError::Serialization {
            path: path.into(),
            source,
        })
    }
}

/// Extension trait for configuration-related Results.
pub trait ConfigResultExt<T> {
    /// Map any error into a [`PlannerError::Configuration`] with a message.
    fn config_context(self, message: &str) -> Result<T>;
}

impl<T, E> ConfigResultExt<T> for std::result::Result<T, E>
where
    E: fmt::Display,
{
    fn config_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::Configuration {
            message: format!("{message}: {e}"),
        })
    }
}

/// Failure reported by an executor for a single command.
///
/// Recorded on the task as its error message; never aborts a sweep.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ExecutionError {
    pub message: String,
}

impl ExecutionError {
    /// Create an execution error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error used when an invocation exceeds the engine's hard timeout.
    pub fn timed_out(limit: jiff::SignedDuration) -> Self {
        Self::new(format!("execution timed out after {limit:#}"))
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, PlannerError>;
