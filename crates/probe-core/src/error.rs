//! Error types for probe-core

use openapi_parser::ParseError;
use thiserror::Error;

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Probe error types.
///
/// Network failures of individual requests are not errors here; they are
/// recorded on the request result so a batch can carry on.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("No endpoints found in the {0} specification")]
    NoEndpoints(String),

    #[error("Specification error: {0}")]
    Specification(#[from] ParseError),

    #[error("Authentication aborted for {environment}: {reason}")]
    AuthenticationAborted { environment: String, reason: String },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
