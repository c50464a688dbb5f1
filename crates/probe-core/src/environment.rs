//! Per-environment execution context

use tracing::debug;
use url::Url;

use crate::error::{ProbeError, Result};
use crate::token::AuthToken;

/// One target API: where to send requests and which token to attach.
///
/// The token is set once after login and only read afterwards.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Human label used in reports ("Homolog", "Production", ...)
    pub label: String,
    /// `scheme://host[:port]`
    pub base_url: String,
    token: Option<AuthToken>,
}

impl Environment {
    pub fn new(label: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Build an environment whose base URL is derived from the document URL
    pub fn from_spec_url(label: impl Into<String>, spec_url: &str) -> Result<Self> {
        let base_url = base_url_from_spec_url(spec_url)?;
        Ok(Self::new(label, base_url))
    }

    pub fn with_token(mut self, token: Option<AuthToken>) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }
}

/// Reduce a document URL to `scheme://host[:port]`; the port is omitted when
/// it is the scheme's default.
pub fn base_url_from_spec_url(spec_url: &str) -> Result<String> {
    let url = Url::parse(spec_url.trim())
        .map_err(|e| ProbeError::InvalidBaseUrl(format!("{}: {}", spec_url, e)))?;

    let host = url
        .host_str()
        .ok_or_else(|| ProbeError::InvalidBaseUrl(format!("{}: no host", spec_url)))?;

    let base = match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    };

    debug!("Base URL for {} is {}", spec_url, base);
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_default_port() {
        assert_eq!(
            base_url_from_spec_url("https://api.example.com/swagger/v1/swagger.json").unwrap(),
            "https://api.example.com"
        );
        assert_eq!(
            base_url_from_spec_url("http://api.example.com:80/docs").unwrap(),
            "http://api.example.com"
        );
    }

    #[test]
    fn test_base_url_custom_port() {
        assert_eq!(
            base_url_from_spec_url("http://localhost:5000/swagger/v1/swagger.json").unwrap(),
            "http://localhost:5000"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            base_url_from_spec_url("not a url"),
            Err(ProbeError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            base_url_from_spec_url("mailto:someone@example.com"),
            Err(ProbeError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_environment_token() {
        let env = Environment::from_spec_url("Homolog", "https://hml.example.com/swagger.json")
            .unwrap()
            .with_token(Some(AuthToken::new("a.b.c")));

        assert_eq!(env.base_url, "https://hml.example.com");
        assert_eq!(env.token().unwrap().as_str(), "a.b.c");
    }
}
