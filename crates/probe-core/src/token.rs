//! Bearer token extraction from login responses

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Three dot-separated URL-safe segments, the shape of a JWT
const TOKEN_PATTERN: &str = r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+$";

fn token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// Opaque bearer credential for one environment
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "AuthToken({}...)", prefix)
    }
}

/// Finds a token-shaped string in a JSON response
pub struct TokenManager;

impl TokenManager {
    /// Depth-first search over object properties, in document order, for
    /// the first string value shaped like a token. Arrays are not entered
    /// and property names are ignored.
    pub fn extract_token(response_body: &str) -> Option<AuthToken> {
        let document: Value = match serde_json::from_str(response_body) {
            Ok(value) => value,
            Err(e) => {
                debug!("Login response is not JSON, no token extracted: {}", e);
                return None;
            }
        };

        Self::find_token(&document).map(AuthToken::new)
    }

    /// Whether `value` has the `segment.segment.segment` shape
    pub fn looks_like_token(value: &str) -> bool {
        token_regex().is_match(value)
    }

    fn find_token(value: &Value) -> Option<&str> {
        match value {
            Value::String(s) if Self::looks_like_token(s) => Some(s.as_str()),
            Value::Object(properties) => properties.values().find_map(Self::find_token),
            _ => None,
        }
    }
}
