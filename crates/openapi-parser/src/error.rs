//! Errors raised while loading a specification document

use thiserror::Error;

/// Result type alias for parser operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// A specification document that cannot be used.
///
/// All variants are fatal for the document they concern.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Could not download the specification: {0}")]
    FetchError(String),

    #[error("Specification has no '{0}' section")]
    MissingField(String),

    #[error("Invalid specification URL: {0}")]
    InvalidUrl(String),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(String),
}
