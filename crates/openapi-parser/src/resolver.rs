//! `$ref` lookup against `components.schemas`
//!
//! Only the top-level reference of a schema is followed. Properties inside
//! the resolved schema are left as written.

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Resolves `$ref` pointers to named component schemas
pub struct SchemaResolver<'a> {
    /// Component schemas from the spec
    schemas: &'a IndexMap<String, Value>,
}

impl<'a> SchemaResolver<'a> {
    /// Create a new resolver with the given component schemas
    pub fn new(schemas: &'a IndexMap<String, Value>) -> Self {
        Self { schemas }
    }

    /// Look up a reference such as `#/components/schemas/User` by its last segment
    pub fn resolve_ref(&self, reference: &str) -> Option<&'a Value> {
        let name = reference.rsplit('/').next()?;
        self.schemas.get(name)
    }

    /// Resolve `schema` if it is a `$ref`, otherwise return it unchanged.
    ///
    /// A component that is itself only a `$ref` is followed as an alias; a
    /// chain that revisits a name stops and yields `None`.
    pub fn resolve<'s>(&self, schema: &'s Value) -> Option<&'s Value>
    where
        'a: 's,
    {
        let mut current = schema;
        let mut visited: HashSet<&str> = HashSet::new();

        while let Some(reference) = reference_of(current) {
            if !visited.insert(reference) {
                warn!("Circular $ref chain detected at {}", reference);
                return None;
            }
            current = self.resolve_ref(reference)?;
        }

        Some(current)
    }
}

fn reference_of(schema: &Value) -> Option<&str> {
    schema.get("$ref").and_then(Value::as_str)
}
