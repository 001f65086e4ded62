//! Record schema derivation and instance checking.
//!
//! The schema is derived from [`ExtractionResult`] itself, so the shape
//! the model is asked to produce and the shape the parser accepts can
//! never drift apart.

use schemars::schema_for;
use serde_json::{Value, json};

use crate::record::ExtractionResult;

/// JSON schema for the canonical record.
#[must_use]
pub fn record_schema() -> Value {
    json!(schema_for!(ExtractionResult))
}

/// Schema variant for constrained decoding.
///
/// Generation endpoints reject JSON Schema meta keys, so `$schema` and
/// `title` are dropped from the derived document.
#[must_use]
pub fn response_schema() -> Value {
    let mut schema = record_schema();
    if let Some(object) = schema.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
    }
    schema
}

/// Collects all schema violations for `instance`, with instance paths.
///
/// An empty result means the instance conforms.
#[must_use]
pub fn collect_schema_violations(schema: &Value, instance: &Value) -> Vec<String> {
    match jsonschema::Validator::new(schema) {
        Ok(validator) => validator
            .iter_errors(instance)
            .map(|error| format!("At path '{}': {}", error.instance_path, error))
            .collect(),
        Err(e) => vec![format!("Schema compilation error: {e}")],
    }
}
