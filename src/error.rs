//! Error types for Gesto operations.
//!
//! Provides typed error context for library consumers.

use std::fmt;

/// Main error type for Gesto operations.
///
/// # Examples
///
/// ```
/// use gesto::error::GestoError;
///
/// let err = GestoError::DimensionMismatch {
///     expected: 1024,
///     actual: 512,
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum GestoError {
    /// An embedding's length disagrees with the store's established
    /// dimensionality.
    DimensionMismatch {
        /// Dimensionality fixed by the first stored example
        expected: usize,
        /// Length of the offending embedding
        actual: usize,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Snapshot serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for GestoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestoError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Embedding dimension mismatch: expected {expected}, got {actual}"
                )
            }
            GestoError::Io(e) => write!(f, "I/O error: {e}"),
            GestoError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            GestoError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for GestoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GestoError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GestoError {
    fn from(err: std::io::Error) -> Self {
        GestoError::Io(err)
    }
}

impl From<&str> for GestoError {
    fn from(msg: &str) -> Self {
        GestoError::Other(msg.to_string())
    }
}

impl From<String> for GestoError {
    fn from(msg: String) -> Self {
        GestoError::Other(msg)
    }
}

impl From<serde_json::Error> for GestoError {
    fn from(err: serde_json::Error) -> Self {
        GestoError::Serialization(err.to_string())
    }
}

/// Convenience result type for Gesto operations.
pub type Result<T> = std::result::Result<T, GestoError>;
