//! Error types for changekit

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ChangekitError
pub type Result<T> = std::result::Result<T, ChangekitError>;

/// Main error type for changekit operations
#[derive(Debug, Error)]
pub enum ChangekitError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Changeset store and codec errors
    #[error(transparent)]
    Changeset(#[from] ChangesetError),

    /// Release notes rendering errors
    #[error(transparent)]
    Notes(#[from] NotesError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Changeset store and record codec errors
#[derive(Debug, Error)]
pub enum ChangesetError {
    /// A record's metadata block is missing, unterminated or unparsable
    #[error("Malformed changeset {file}: {reason}")]
    MalformedRecord { file: String, reason: String },

    /// A record cannot be persisted as given
    #[error("Invalid changeset: {0}")]
    InvalidRecord(String),

    /// Filesystem failure other than a missing store directory
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChangesetError {
    /// Create a malformed-record error
    pub fn malformed(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an IO error with the path it happened at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Release notes rendering errors
#[derive(Debug, Error)]
pub enum NotesError {
    /// Structured output could not be serialized
    #[error("Failed to format release notes: {0}")]
    Format(#[from] serde_json::Error),

    /// Failed to write release notes
    #[error("Failed to write release notes to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = ChangesetError::malformed("20240101T000000-pr-1.md", "unterminated metadata block");
        assert_eq!(
            err.to_string(),
            "Malformed changeset 20240101T000000-pr-1.md: unterminated metadata block"
        );
    }

    #[test]
    fn test_changeset_error_converts_transparently() {
        let err: ChangekitError = ChangesetError::InvalidRecord("empty title".to_string()).into();
        assert_eq!(err.to_string(), "Invalid changeset: empty title");
    }
}
