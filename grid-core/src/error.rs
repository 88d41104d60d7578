//! Error types for layout operations.
//!
//! Only document import can fail. Every other operation is total: out of
//! range numbers are clamped instead of rejected.

use thiserror::Error;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors that can occur while importing a layout document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The input text is not well-formed JSON.
    #[error("Invalid JSON: {0}")]
    Parse(String),

    /// The JSON is well-formed but does not describe a valid layout document.
    #[error("Invalid layout document: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A schema violation found while validating a layout document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Location of the offending value, e.g. `elements[0].placements.desktop.col`.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for the given path.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
