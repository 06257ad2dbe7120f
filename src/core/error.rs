//! Error types for the logging subsystem

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A configuration value is present but cannot be parsed as its declared type
    #[error("Invalid configuration for '{key}': {message}")]
    Configuration { key: String, message: String },

    /// A log directory could not be created
    #[error("Failed to create log directory '{path}': {source}")]
    DirectoryCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A sink failed while writing a record
    #[error("Sink '{sink}' failed to write record: {message}")]
    SinkWrite { sink: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },
}

impl LoggerError {
    /// Create a configuration error for a given key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Configuration {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a directory creation error
    pub fn directory_creation(path: &Path, source: std::io::Error) -> Self {
        LoggerError::DirectoryCreation {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error must abort application startup
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LoggerError::Configuration { .. } | LoggerError::DirectoryCreation { .. }
        )
    }
}

impl From<::config::ConfigError> for LoggerError {
    fn from(err: ::config::ConfigError) -> Self {
        let key = match &err {
            ::config::ConfigError::NotFound(key) => key.clone(),
            ::config::ConfigError::Type { key: Some(key), .. } => key.clone(),
            _ => "configuration".to_string(),
        };
        LoggerError::config(key, err.to_string())
    }
}
