//! Specification document loading

use crate::error::{ParseError, ParseResult};
use crate::types::RawOpenApiSpec;
use std::time::Duration;
use tracing::{debug, info};

/// Timeout for downloading a specification document
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAPI/Swagger document parser
pub struct OpenApiParser;

impl OpenApiParser {
    /// Parse a document from a string (auto-detects JSON/YAML)
    pub fn parse(content: &str) -> ParseResult<RawOpenApiSpec> {
        if content.trim_start().starts_with('{') {
            Self::parse_json(content)
        } else {
            Self::parse_yaml(content)
        }
    }

    /// Parse a document from JSON
    pub fn parse_json(content: &str) -> ParseResult<RawOpenApiSpec> {
        let spec: RawOpenApiSpec = serde_json::from_str(content)?;
        Self::log_version(&spec);
        Ok(spec)
    }

    /// Parse a document from YAML
    pub fn parse_yaml(content: &str) -> ParseResult<RawOpenApiSpec> {
        let spec: RawOpenApiSpec = serde_yaml::from_str(content)?;
        Self::log_version(&spec);
        Ok(spec)
    }

    /// Fetch and parse a document from a URL
    pub async fn fetch_document(url: &str) -> ParseResult<RawOpenApiSpec> {
        info!("Fetching OpenAPI spec from: {}", url);

        url::Url::parse(url).map_err(|e| ParseError::InvalidUrl(format!("{}: {}", url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| ParseError::HttpError(e.to_string()))?;

        let response = client
            .get(url)
            .header("Accept", "application/json, application/yaml, text/yaml")
            .send()
            .await
            .map_err(|e| ParseError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ParseError::FetchError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let content = response
            .text()
            .await
            .map_err(|e| ParseError::FetchError(e.to_string()))?;

        // Parse based on content type or file extension
        if content_type.contains("yaml") || url.ends_with(".yaml") || url.ends_with(".yml") {
            Self::parse_yaml(&content)
        } else {
            Self::parse(&content)
        }
    }

    fn log_version(spec: &RawOpenApiSpec) {
        debug!(
            "Parsed spec version {} with {} paths",
            spec.version().unwrap_or("unknown"),
            spec.paths.as_ref().map_or(0, |p| p.len())
        );
    }
}
