//! Error types for value synthesis

use thiserror::Error;

/// Result type alias for synthesis operations
pub type SynthesisResult<T> = std::result::Result<T, SynthesisError>;

/// Failures while synthesizing a single field.
///
/// These never escape the synthesizer: each one is turned into a diagnostic
/// string stored as that field's value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("Schema for '{0}' is not an object")]
    NotAnObject(String),

    #[error("Unsupported type declaration for '{field}': {found}")]
    InvalidType { field: String, found: String },

    #[error("Maximum nesting depth {depth} exceeded at '{field}'")]
    DepthExceeded { field: String, depth: usize },
}
