//! Probe Core - runs the operations of an OpenAPI document against one or
//! two environments
//!
//! This crate provides:
//! - Request execution with path/query assembly and bearer authentication
//! - The login flow with an injectable credential source
//! - Token extraction from login responses
//! - Canonical JSON comparison and positional line diffs
//! - Run settings

pub mod auth;
pub mod compare;
pub mod environment;
pub mod error;
pub mod executor;
pub mod report;
pub mod runner;
pub mod settings;
pub mod token;

pub use auth::{
    parse_login_body, AuthOutcome, AuthState, Authenticator, BodyPrompt, CredentialSource,
    ScriptedCredentials,
};
pub use compare::{LineDiscrepancy, ResponseComparator};
pub use environment::{base_url_from_spec_url, Environment};
pub use error::{ProbeError, Result};
pub use executor::{build_url, parameter_string, RequestExecutor, RequestResult, DEFAULT_TIMEOUT};
pub use report::{ComparisonResult, DualReport, Exchange, MemoryTranscript, Transcript};
pub use runner::Probe;
pub use settings::{LogFileSettings, ProbeSettings};
pub use token::{AuthToken, TokenManager};
