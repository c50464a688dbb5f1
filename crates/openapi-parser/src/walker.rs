//! Endpoint extraction from OpenAPI specs

use fake_data::FakeValueSynthesizer;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::error::{ParseError, ParseResult};
use crate::login;
use crate::parser::OpenApiParser;
use crate::resolver::SchemaResolver;
use crate::types::*;

/// Walks a specification and produces one [`Endpoint`] per operation,
/// in the document's own path/method order.
#[derive(Debug, Clone, Default)]
pub struct SchemaWalker {
    synthesizer: FakeValueSynthesizer,
}

impl SchemaWalker {
    /// Create a walker with the default synthesizer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a walker that synthesizes values with `synthesizer`
    pub fn with_synthesizer(synthesizer: FakeValueSynthesizer) -> Self {
        Self { synthesizer }
    }

    pub fn synthesizer(&self) -> &FakeValueSynthesizer {
        &self.synthesizer
    }

    /// Fetch a document and walk it.
    ///
    /// Any failure is logged and yields an empty list; callers treat an
    /// empty list as "no usable specification".
    pub async fn fetch_endpoints(&self, url: &str) -> Vec<Endpoint> {
        match self.try_fetch_endpoints(url).await {
            Ok(endpoints) => endpoints,
            Err(e) => {
                error!("Could not read endpoints from {}: {}", url, e);
                Vec::new()
            }
        }
    }

    /// Fetch a document and walk it, surfacing the failure
    pub async fn try_fetch_endpoints(&self, url: &str) -> ParseResult<Vec<Endpoint>> {
        let spec = OpenApiParser::fetch_document(url).await?;
        let endpoints = self.walk(&spec)?;
        info!("Found {} endpoints in {}", endpoints.len(), url);
        Ok(endpoints)
    }

    /// Parse and walk a document held in memory
    pub fn walk_str(&self, content: &str) -> ParseResult<Vec<Endpoint>> {
        let spec = OpenApiParser::parse(content)?;
        self.walk(&spec)
    }

    /// Walk a parsed document
    pub fn walk(&self, spec: &RawOpenApiSpec) -> ParseResult<Vec<Endpoint>> {
        let paths = spec
            .paths
            .as_ref()
            .ok_or_else(|| ParseError::MissingField("paths".to_string()))?;

        let components = spec.components.clone().unwrap_or_default();
        let resolver = SchemaResolver::new(&components.schemas);

        let mut endpoints = Vec::new();

        for (path, path_item) in paths {
            let path_params = Self::path_level_parameters(path, path_item);

            for (key, raw_operation) in path_item {
                let Some(method) = HttpMethod::from_key(key) else {
                    continue;
                };

                let operation: RawOperation = match serde_json::from_value(raw_operation.clone()) {
                    Ok(op) => op,
                    Err(e) => {
                        warn!("Skipping malformed operation {} {}: {}", method, path, e);
                        continue;
                    }
                };

                let endpoint = self.build_endpoint(
                    path,
                    method,
                    &operation,
                    &path_params,
                    &components.parameters,
                    &resolver,
                );
                debug!(
                    "Walked {} (auth: {}, login: {})",
                    endpoint, endpoint.requires_authentication, endpoint.is_login_endpoint
                );
                endpoints.push(endpoint);
            }
        }

        Ok(endpoints)
    }

    fn path_level_parameters(path: &str, path_item: &IndexMap<String, Value>) -> Vec<RawParameter> {
        let Some(raw) = path_item.get("parameters") else {
            return Vec::new();
        };

        serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
            warn!("Ignoring malformed path-level parameters on {}: {}", path, e);
            Vec::new()
        })
    }

    fn build_endpoint(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &RawOperation,
        path_params: &[RawParameter],
        shared_params: &IndexMap<String, RawParameter>,
        resolver: &SchemaResolver,
    ) -> Endpoint {
        let mut endpoint = Endpoint::new(method, path);
        endpoint.requires_authentication = operation.has_security();

        endpoint.request_body = operation
            .request_body
            .as_ref()
            .map(|body| self.body_values(body, resolver))
            .filter(|values| !values.is_empty());

        let params = self.parameter_values(operation, path_params, shared_params, resolver);
        endpoint.query_parameters = Some(params).filter(|values| !values.is_empty());

        endpoint.is_login_endpoint = login::is_login_endpoint(path, operation, resolver);
        endpoint
    }

    /// Synthesize the direct properties of the request body schema
    fn body_values(&self, body: &RawRequestBody, resolver: &SchemaResolver) -> Map<String, Value> {
        // Prefer JSON content type
        let media = body
            .content
            .iter()
            .find(|(ct, _)| ct.contains("json"))
            .or_else(|| body.content.first())
            .map(|(_, media)| media);

        let Some(schema) = media.and_then(|m| m.schema.as_ref()) else {
            return Map::new();
        };

        let Some(resolved) = resolver.resolve(schema) else {
            warn!("Request body schema could not be resolved: {}", schema);
            return Map::new();
        };

        resolved
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| self.synthesizer.synthesize_properties(properties))
            .unwrap_or_default()
    }

    /// Synthesize one value per named parameter with a schema.
    ///
    /// Path-level parameters come first; an operation parameter with the
    /// same name replaces the value.
    fn parameter_values(
        &self,
        operation: &RawOperation,
        path_params: &[RawParameter],
        shared_params: &IndexMap<String, RawParameter>,
        resolver: &SchemaResolver,
    ) -> Map<String, Value> {
        let mut values = Map::new();

        for param in path_params.iter().chain(&operation.parameters) {
            let Some(param) = Self::resolve_parameter(param, shared_params) else {
                continue;
            };

            if let (Some(name), Some(schema)) = (&param.name, &param.schema) {
                let schema = resolver.resolve(schema).unwrap_or(schema);
                values.insert(name.clone(), self.synthesizer.synthesize(name, schema));
            }
        }

        values
    }

    fn resolve_parameter<'p>(
        param: &'p RawParameter,
        shared_params: &'p IndexMap<String, RawParameter>,
    ) -> Option<&'p RawParameter> {
        match &param.reference {
            Some(reference) => {
                let resolved = reference
                    .rsplit('/')
                    .next()
                    .and_then(|name| shared_params.get(name));
                if resolved.is_none() {
                    warn!("Unresolved parameter reference: {}", reference);
                }
                resolved
            }
            None => Some(param),
        }
    }
}
