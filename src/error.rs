//! Error types for AICapacity
//!
//! Host probing failures are represented here so they can be logged and
//! turned into degradation records; configuration and catalog failures are
//! surfaced to the binary.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for AICapacity operations
#[derive(Error, Debug)]
pub enum CapacityError {
    /// A host information source could not be used
    #[error("Host information unavailable from {source_name}: {message}")]
    HostInfoUnavailable {
        source_name: String,
        message: String,
    },

    /// I/O error while reading a host file or catalog
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External utility could not be run or exited unsuccessfully
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Host output did not have the expected shape
    #[error("Failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Model catalog is malformed
    #[error("Invalid model catalog: {0}")]
    InvalidCatalog(String),

    /// Writing the report failed
    #[error("Failed to write report: {0}")]
    Output(#[source] std::io::Error),

    /// JSON serialization or deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CapacityError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a host-unavailable error
    pub fn host_unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HostInfoUnavailable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a command failure error
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            what: what.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog(message.into())
    }

    /// Whether the report reader went away (e.g. `aicapacity | head`)
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

/// Result type alias for AICapacity operations
pub type Result<T> = std::result::Result<T, CapacityError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| CapacityError::io(path, e))
    }
}
