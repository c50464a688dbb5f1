//! Dispatch of one endpoint against one environment

use openapi_parser::{Endpoint, HttpMethod};
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ProbeError, Result};
use crate::token::AuthToken;

/// Per-request timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one request.
///
/// Transport failures and timeouts are recorded here rather than returned
/// as errors, so a batch over many endpoints can continue.
#[derive(Debug, Clone, Default)]
pub struct RequestResult {
    /// Full URL the request was sent to
    pub route: String,
    /// Compact JSON body that was sent, if any
    pub request_body: Option<String>,
    /// Narrative of the request, for the transcript
    pub request_info: String,
    /// Narrative of the response or of the failure
    pub response_info: String,
    /// HTTP status, absent when no response arrived
    pub status: Option<u16>,
    /// Reason phrase for `status`
    pub reason: String,
    /// Raw response body, never parsed here
    pub response_body: String,
}

impl RequestResult {
    /// Status in `[200, 300)`
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }
}

/// Sends endpoint requests with a bounded timeout
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    /// Create an executor with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create an executor whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }

    /// Execute `endpoint` against `base_url`, attaching `token` as a bearer header
    pub async fn execute(
        &self,
        base_url: &str,
        endpoint: &Endpoint,
        token: Option<&AuthToken>,
    ) -> RequestResult {
        let route = build_url(base_url, endpoint);
        let method = match endpoint.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Trace => reqwest::Method::TRACE,
        };

        let mut request = self.client.request(method, &route);

        if let Some(token) = token.filter(|t| !t.as_str().is_empty()) {
            request = request.header("Authorization", token.bearer_header());
        }

        let request_body = endpoint
            .request_body
            .as_ref()
            .filter(|body| !body.is_empty())
            .map(|body| Value::Object(body.clone()).to_string());

        if let Some(body) = &request_body {
            request = request
                .header("Content-Type", "application/json")
                .body(body.clone());
        }

        let mut request_info = format!("Request: {} {}\n", endpoint.method, route);
        if let Some(body) = &request_body {
            request_info.push_str(&format!("Request Body: {}\n", body));
        }

        let mut result = RequestResult {
            route,
            request_body,
            request_info,
            ..Default::default()
        };

        info!("Executing {} {}", endpoint.method, result.route);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                result.response_info = Self::failure_message(&e);
                warn!("{} {} failed: {}", endpoint.method, result.route, e);
                return result;
            }
        };

        let status = response.status();
        result.status = Some(status.as_u16());
        result.reason = status.canonical_reason().unwrap_or_default().to_string();

        match response.text().await {
            Ok(body) => result.response_body = body,
            Err(e) => {
                result.response_info = Self::failure_message(&e);
                warn!("Could not read response from {}: {}", result.route, e);
                return result;
            }
        }

        result.response_info = format!(
            "Response: Status Code: {} ({})\nContent: {}",
            status.as_u16(),
            result.reason,
            result.response_body
        );

        debug!("{} {} -> {}", endpoint.method, result.route, status);
        result
    }

    fn failure_message(error: &reqwest::Error) -> String {
        if error.is_timeout() {
            "Error: the request exceeded the time limit.".to_string()
        } else {
            format!("Error sending request: {}", error)
        }
    }
}

/// Build the request URL for `endpoint`.
///
/// Parameters named by a `{name}` placeholder are substituted into the path;
/// the rest become `name=value` query pairs. `?` is only added when at least
/// one pair exists. The endpoint itself is left untouched.
pub fn build_url(base_url: &str, endpoint: &Endpoint) -> String {
    let mut path = endpoint.path.clone();
    let mut pairs = Vec::new();

    let empty = Map::new();
    let params = endpoint.query_parameters.as_ref().unwrap_or(&empty);

    for (name, value) in params {
        let placeholder = format!("{{{}}}", name);
        let rendered = parameter_string(value);

        if path.contains(&placeholder) {
            path = path.replace(&placeholder, &rendered);
        } else {
            let encoded: String = url::form_urlencoded::Serializer::new(String::new())
                .append_pair(name, &rendered)
                .finish();
            pairs.push(encoded);
        }
    }

    let mut url = format!("{}{}", base_url.trim_end_matches('/'), path);
    if !pairs.is_empty() {
        url.push('?');
        url.push_str(&pairs.join("&"));
    }
    url
}

/// String form of a synthesized parameter value; strings are used as-is
pub fn parameter_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
