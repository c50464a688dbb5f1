//! # openapi-parser
//!
//! OpenAPI/Swagger walker for Swagger Probe.
//! Reads a specification document, enumerates its operations in document
//! order and turns each one into an [`Endpoint`] carrying synthesized
//! request body and parameter values.

mod types;
mod parser;
mod resolver;
mod walker;
mod error;
pub mod login;

pub use types::*;
pub use parser::OpenApiParser;
pub use resolver::SchemaResolver;
pub use walker::SchemaWalker;
pub use error::{ParseError, ParseResult};
