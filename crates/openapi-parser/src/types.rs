//! Type definitions for walked OpenAPI specs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// HTTP methods supported by OpenAPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Parse a path-item key such as `get` or `POST`.
    ///
    /// Returns `None` for keys that are not operations (`parameters`, `summary`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "patch" => Some(HttpMethod::Patch),
            "delete" => Some(HttpMethod::Delete),
            "head" => Some(HttpMethod::Head),
            "options" => Some(HttpMethod::Options),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One operation of a specification with synthesized inputs attached.
///
/// `path` + `method` identify the operation within one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Path template, may contain `{name}` placeholders
    pub path: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Synthesized JSON body fields, absent when the operation declares none
    pub request_body: Option<Map<String, Value>>,
    /// Synthesized path/query parameter values, absent when none are declared
    pub query_parameters: Option<Map<String, Value>>,
    /// The operation carries a non-empty `security` requirement
    pub requires_authentication: bool,
    /// The operation looks like a login (token-shaped response or login-like path)
    pub is_login_endpoint: bool,
}

impl Endpoint {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            request_body: None,
            query_parameters: None,
            requires_authentication: false,
            is_login_endpoint: false,
        }
    }

    /// Whether `other` is the same operation (path and method)
    pub fn same_operation(&self, other: &Endpoint) -> bool {
        self.method == other.method && self.path == other.path
    }

    /// Whether a non-empty body has been synthesized
    pub fn has_body(&self) -> bool {
        self.request_body.as_ref().is_some_and(|b| !b.is_empty())
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

// --- Raw document structures for parsing ---

/// Raw OpenAPI/Swagger document, reduced to the parts the walker reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOpenApiSpec {
    pub openapi: Option<String>,
    pub swagger: Option<String>,
    /// Path template -> path item (method keys and path-level fields, in document order)
    pub paths: Option<IndexMap<String, IndexMap<String, Value>>>,
    #[serde(default)]
    pub components: Option<RawComponents>,
}

impl RawOpenApiSpec {
    /// Declared document version, whichever field carries it
    pub fn version(&self) -> Option<&str> {
        self.openapi.as_deref().or(self.swagger.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOperation {
    /// Kept loose: only "is a non-empty array" matters
    pub security: Option<Value>,
    pub request_body: Option<RawRequestBody>,
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
    #[serde(default)]
    pub responses: IndexMap<String, RawResponse>,
}

impl RawOperation {
    pub fn has_security(&self) -> bool {
        self.security
            .as_ref()
            .and_then(Value::as_array)
            .is_some_and(|reqs| !reqs.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParameter {
    pub name: Option<String>,
    #[serde(rename = "in")]
    pub location: Option<String>,
    pub schema: Option<Value>,
    /// Reference to a parameter in components/parameters
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRequestBody {
    #[serde(default)]
    pub content: IndexMap<String, RawMediaType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMediaType {
    pub schema: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub content: Option<IndexMap<String, RawMediaType>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComponents {
    #[serde(default)]
    pub schemas: IndexMap<String, Value>,
    #[serde(default)]
    pub parameters: IndexMap<String, RawParameter>,
}
