//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required property was absent from a record.
    #[error("missing property: {0}")]
    MissingProperty(String),

    /// A property held a value of the wrong kind.
    #[error("type mismatch on property '{key}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// The property key.
        key: String,
        /// The expected value kind.
        expected: &'static str,
        /// The actual value kind.
        actual: &'static str,
    },

    /// A validation error occurred.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
