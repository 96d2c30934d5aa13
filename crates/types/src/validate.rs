//! Validation of JSON values against an [`ObjectSchema`].
//!
//! Dispatch runs this for both `args` and `auth` before a handler is
//! invoked, so handlers can assume the declared shape.

use serde_json::Value;
use thiserror::Error;

use crate::schema::{FieldKind, ObjectSchema};

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Dotted path to the offending field (top-level fields are bare names).
    pub path: String,
    /// What was expected or what went wrong.
    pub message: String,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validation failure carrying every detected issue, not just the first.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("invalid fields: {}", .0.iter().map(FieldIssue::to_string).collect::<Vec<_>>().join("; "))]
    Fields(Vec<FieldIssue>),
}

/// Validate `value` against `schema`, collecting all field issues.
///
/// Fields not declared in the schema are ignored rather than rejected; the
/// gateway forwards only declared fields, so unknown keys are harmless.
pub fn validate_object(schema: &ObjectSchema, value: &Value) -> Result<(), ValidationError> {
    let Some(map) = value.as_object() else {
        return Err(ValidationError::NotAnObject);
    };

    let mut issues = Vec::new();
    for (name, kind) in &schema.fields {
        match map.get(name) {
            None => {
                if !kind.is_optional() {
                    issues.push(FieldIssue {
                        path: name.clone(),
                        message: "required field is missing".to_string(),
                    });
                }
            }
            Some(Value::Null) if kind.accepts_null() => {}
            Some(field_value) => check_kind(name, kind.unwrap_wrappers(), field_value, &mut issues),
        }
    }

    if issues.is_empty() { Ok(()) } else { Err(ValidationError::Fields(issues)) }
}

fn check_kind(path: &str, kind: &FieldKind, value: &Value, issues: &mut Vec<FieldIssue>) {
    match kind {
        FieldKind::Str => {
            if !value.is_string() {
                push_expected(path, "a string", issues);
            }
        }
        FieldKind::Num => {
            if !value.is_number() {
                push_expected(path, "a number", issues);
            }
        }
        FieldKind::Bool => {
            if !value.is_boolean() {
                push_expected(path, "a boolean", issues);
            }
        }
        FieldKind::Obj(inner) => match value.as_object() {
            Some(_) => {
                // Nested objects are validated recursively even though
                // discovery collapses them to an opaque label.
                if let Err(ValidationError::Fields(nested)) = validate_object(inner, value) {
                    for issue in nested {
                        issues.push(FieldIssue {
                            path: format!("{path}.{}", issue.path),
                            message: issue.message,
                        });
                    }
                }
            }
            None => push_expected(path, "an object", issues),
        },
        FieldKind::Arr(element) => match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    check_kind(&format!("{path}[{index}]"), element.unwrap_wrappers(), item, issues);
                }
            }
            None => push_expected(path, "an array", issues),
        },
        FieldKind::OneOf(alternatives) => {
            let matches_any = alternatives.iter().any(|alternative| {
                let mut probe = Vec::new();
                check_kind(path, alternative.unwrap_wrappers(), value, &mut probe);
                probe.is_empty()
            });
            if !matches_any {
                push_expected(path, "a value matching one of the union alternatives", issues);
            }
        }
        FieldKind::Enum(literals) => {
            let accepted = value.as_str().is_some_and(|text| literals.iter().any(|lit| lit == text));
            if !accepted {
                push_expected(path, &format!("one of [{}]", literals.join(", ")), issues);
            }
        }
        // Wrappers were unwrapped by the caller; Unknown accepts anything.
        FieldKind::Optional(_) | FieldKind::Nullable(_) | FieldKind::Effects(_) | FieldKind::Unknown => {}
    }
}

fn push_expected(path: &str, expected: &str, issues: &mut Vec<FieldIssue>) {
    issues.push(FieldIssue {
        path: path.to_string(),
        message: format!("expected {expected}"),
    });
}
