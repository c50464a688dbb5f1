//! Login operation detection
//!
//! Two independent signals, either one is enough:
//! a declared response schema exposes a token-like top-level property, or
//! the path itself contains a login-like keyword.

use serde_json::Value;

use crate::resolver::SchemaResolver;
use crate::types::RawOperation;

/// Path fragments that mark an authentication entry point
pub const PATH_KEYWORDS: &[&str] = &["login", "auth", "autentic"];

/// Response property fragments that mark a token-issuing operation
pub const TOKEN_PROPERTY_KEYWORDS: &[&str] = &["access_token", "token"];

/// Whether an operation at `path` should be offered as a login endpoint
pub fn is_login_endpoint(path: &str, operation: &RawOperation, resolver: &SchemaResolver) -> bool {
    response_declares_token(operation, resolver) || path_has_login_keyword(path)
}

/// Case-insensitive keyword check on the path template
pub fn path_has_login_keyword(path: &str) -> bool {
    let lowered = path.to_lowercase();
    PATH_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Whether any response media type declares a top-level token-like property
pub fn response_declares_token(operation: &RawOperation, resolver: &SchemaResolver) -> bool {
    operation
        .responses
        .values()
        .filter_map(|response| response.content.as_ref())
        .flat_map(|content| content.values())
        .filter_map(|media| media.schema.as_ref())
        .filter_map(|schema| resolver.resolve(schema))
        .any(schema_has_token_property)
}

fn schema_has_token_property(schema: &Value) -> bool {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .is_some_and(|properties| properties.keys().any(|name| is_token_name(name)))
}

fn is_token_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    TOKEN_PROPERTY_KEYWORDS.iter().any(|k| lowered.contains(k))
}
