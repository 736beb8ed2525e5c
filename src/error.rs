//! Error types for qqwry-seek
//!
//! This module defines custom error types using thiserror. Lookups never
//! surface these to callers of the service; they are absorbed at the
//! `GeoLookupService` boundary and turned into sentinel strings.

use thiserror::Error;

/// Main error type for qqwry-seek
#[derive(Error, Debug)]
pub enum SeekError {
    /// Database file missing or its header is unusable
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(String),

    /// Index or location bytes are internally inconsistent
    #[error("Record corrupt: {0}")]
    RecordCorrupt(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Read past the end of the byte source
    #[error("Read out of bounds: offset={offset}, len={len}")]
    OutOfBounds { offset: u64, len: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    Yaml(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`SeekError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DatabaseUnavailable,
    RecordCorrupt,
    IoFailure,
    Other,
}

/// Result type alias for qqwry-seek
pub type Result<T> = std::result::Result<T, SeekError>;

impl SeekError {
    /// Create a database-unavailable error
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        SeekError::DatabaseUnavailable(msg.into())
    }

    /// Create a record-corrupt error
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        SeekError::RecordCorrupt(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SeekError::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SeekError::DatabaseUnavailable(_) => ErrorKind::DatabaseUnavailable,
            SeekError::RecordCorrupt(_) => ErrorKind::RecordCorrupt,
            SeekError::Io(_) | SeekError::OutOfBounds { .. } => ErrorKind::IoFailure,
            _ => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(
            SeekError::unavailable("missing").kind(),
            ErrorKind::DatabaseUnavailable
        );
        assert_eq!(SeekError::corrupt("loop").kind(), ErrorKind::RecordCorrupt);
        assert_eq!(
            SeekError::OutOfBounds { offset: 9, len: 8 }.kind(),
            ErrorKind::IoFailure
        );
        assert_eq!(SeekError::config("bad").kind(), ErrorKind::Other);
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = SeekError::OutOfBounds { offset: 12, len: 10 };
        assert_eq!(err.to_string(), "Read out of bounds: offset=12, len=10");
    }
}
