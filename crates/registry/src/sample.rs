//! Sample payload generator: one concrete example value per field.
//!
//! Values are chosen from the field's kind plus name heuristics (a string
//! field whose name mentions `email` gets a sample address, and so on).
//! The generator captures its timestamp at construction so repeated runs
//! over the same schema produce byte-identical output; generation itself
//! performs no I/O and uses no randomness.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde_json::{Value, json};
use switchboard_types::FieldKind;
use switchboard_util::sanitize_token;

use crate::describe::field_label;

/// Deterministic example-value generator.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    timestamp: String,
}

impl SampleGenerator {
    /// Generator stamped with the current time.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Generator stamped with a fixed time; used by tests and anywhere
    /// reproducible output matters.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Produce an example value per field of an object-shaped schema.
    ///
    /// Mirrors [`crate::describe_schema`]: top-level wrappers are unwrapped
    /// first, and a non-object schema yields an empty payload.
    pub fn sample_payload(&self, schema: &FieldKind) -> IndexMap<String, Value> {
        match schema.unwrap_wrappers() {
            FieldKind::Obj(object) => object
                .fields
                .iter()
                .map(|(name, kind)| (name.clone(), self.sample_value(name, kind)))
                .collect(),
            _ => IndexMap::new(),
        }
    }

    /// Example value for one field, from its kind and name.
    pub fn sample_value(&self, name: &str, kind: &FieldKind) -> Value {
        match kind.unwrap_wrappers() {
            FieldKind::Str => self.sample_string(name),
            FieldKind::Num => json!(123),
            FieldKind::Bool => json!(true),
            FieldKind::Obj(_) => json!({}),
            FieldKind::Arr(_) => json!([]),
            FieldKind::Enum(literals) => match literals.first() {
                Some(first) => json!(first),
                None => json!("enum_value"),
            },
            // Deliberately not a type-correct guess; consumers treat this
            // as placeholder data.
            FieldKind::OneOf(_) => json!("selected_union_option_value"),
            other => json!(format!("sample_{}", sanitize_token(&field_label(other)))),
        }
    }

    fn sample_string(&self, name: &str) -> Value {
        let lowered = name.to_lowercase();
        if lowered.contains("email") {
            json!("user@example.com")
        } else if lowered.contains("id") {
            json!("identifier_123")
        } else if lowered.contains("time") || lowered.contains("date") {
            json!(self.timestamp)
        } else {
            json!("string_value")
        }
    }
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}
