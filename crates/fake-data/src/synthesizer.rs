//! Schema fragment + field name -> synthetic JSON value

use rand::{Rng, RngCore};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{SynthesisError, SynthesisResult};
use crate::rules::{self, NameRule};
use crate::vocab;

/// Default bound on nested `object` expansion
pub const DEFAULT_MAX_DEPTH: usize = 8;

const UNKNOWN_OBJECT: &str = "Could not determine the data type.";

/// Generates plausible values for schema properties.
///
/// Output is random; only the *kind* of value is determined by the inputs.
/// Failures are contained per field: a field that cannot be synthesized gets
/// a diagnostic string and its siblings are unaffected.
#[derive(Debug, Clone)]
pub struct FakeValueSynthesizer {
    rules: Vec<NameRule>,
    max_depth: usize,
}

impl FakeValueSynthesizer {
    /// Create a synthesizer with the built-in rule table
    pub fn new() -> Self {
        Self {
            rules: rules::default_rules(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the field-name rule table
    pub fn with_rules(mut self, rules: Vec<NameRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Bound nested object expansion
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn rules(&self) -> &[NameRule] {
        &self.rules
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Synthesize a value for one field
    pub fn synthesize(&self, field_name: &str, schema: &Value) -> Value {
        self.synthesize_with(&mut rand::thread_rng(), field_name, schema)
    }

    /// Synthesize a value for one field using the given random source
    pub fn synthesize_with<R: RngCore>(&self, rng: &mut R, field_name: &str, schema: &Value) -> Value {
        self.synthesize_field(rng, field_name, schema, 0)
    }

    /// Synthesize one value per entry of a `properties` map, preserving order
    pub fn synthesize_properties(&self, properties: &Map<String, Value>) -> Map<String, Value> {
        let mut rng = rand::thread_rng();
        properties
            .iter()
            .map(|(name, schema)| (name.clone(), self.synthesize_field(&mut rng, name, schema, 0)))
            .collect()
    }

    fn synthesize_field(&self, rng: &mut dyn RngCore, field_name: &str, schema: &Value, depth: usize) -> Value {
        match self.try_synthesize(rng, field_name, schema, depth) {
            Ok(value) => value,
            Err(e) => {
                warn!("Synthesis failed for field '{}': {}", field_name, e);
                Value::String(format!("Failed to generate value: {}", e))
            }
        }
    }

    fn try_synthesize(
        &self,
        rng: &mut dyn RngCore,
        field_name: &str,
        schema: &Value,
        depth: usize,
    ) -> SynthesisResult<Value> {
        let fragment = schema
            .as_object()
            .ok_or_else(|| SynthesisError::NotAnObject(field_name.to_string()))?;

        let kind = declared_type(field_name, fragment)?;
        let format = fragment
            .get("format")
            .and_then(Value::as_str)
            .map(str::to_lowercase);

        let value = match kind.as_str() {
            "string" => match format.as_deref() {
                Some("uuid") => Value::String(Uuid::new_v4().to_string()),
                Some("date") | Some("date-time") => rules::timestamp(),
                _ => rules::apply(&self.rules, field_name, rng)
                    .unwrap_or_else(|| Value::String(vocab::word(rng))),
            },
            "object" => match rules::apply(&self.rules, field_name, rng) {
                Some(value) => value,
                None => self.expand_object(rng, field_name, fragment, depth)?,
            },
            "integer" => Value::from(rng.gen_range(1..=50_000)),
            "number" => json!(rng.gen::<f64>()),
            "boolean" => Value::Bool(rng.gen()),
            "array" => json!([vocab::department(rng), vocab::product(rng)]),
            other => {
                debug!("Unknown type '{}' for field '{}', using a filler word", other, field_name);
                Value::String(vocab::word(rng))
            }
        };

        Ok(value)
    }

    fn expand_object(
        &self,
        rng: &mut dyn RngCore,
        field_name: &str,
        fragment: &Map<String, Value>,
        depth: usize,
    ) -> SynthesisResult<Value> {
        let Some(properties) = fragment.get("properties").and_then(Value::as_object) else {
            return Ok(Value::String(UNKNOWN_OBJECT.to_string()));
        };

        if depth >= self.max_depth {
            return Err(SynthesisError::DepthExceeded {
                field: field_name.to_string(),
                depth: self.max_depth,
            });
        }

        let object = properties
            .iter()
            .map(|(name, schema)| (name.clone(), self.synthesize_field(rng, name, schema, depth + 1)))
            .collect();

        Ok(Value::Object(object))
    }
}

impl Default for FakeValueSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// The lower-cased `type` of a fragment, `"string"` when absent.
///
/// A type list such as `["string", "null"]` resolves to its first non-null entry.
fn declared_type(field_name: &str, fragment: &Map<String, Value>) -> SynthesisResult<String> {
    match fragment.get("type") {
        None | Some(Value::Null) => Ok("string".to_string()),
        Some(Value::String(s)) => Ok(s.to_lowercase()),
        Some(Value::Array(types)) => Ok(types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| !t.eq_ignore_ascii_case("null"))
            .unwrap_or("string")
            .to_lowercase()),
        Some(other) => Err(SynthesisError::InvalidType {
            field: field_name.to_string(),
            found: other.to_string(),
        }),
    }
}
