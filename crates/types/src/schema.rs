//! Closed schema representation for action arguments and auth material.
//!
//! Provider modules build an [`ObjectSchema`] once at registration time;
//! the registry derives type labels and sample payloads from it, and the
//! dispatch path validates incoming JSON against it. There is no runtime
//! reflection over a validation library — the schema *is* the data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The kind of value a single field accepts.
///
/// Wrapper variants (`Optional`, `Nullable`, `Effects`) carry their inner
/// kind; unwrapping always terminates because the structure is a finite,
/// owned tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// UTF-8 string.
    Str,
    /// Integer or float.
    Num,
    /// Boolean.
    Bool,
    /// Nested object. Discovery collapses these to the opaque `Object`
    /// label regardless of the fields declared here.
    Obj(ObjectSchema),
    /// Homogeneous array of the element kind.
    Arr(Box<FieldKind>),
    /// Tagged union: the value must satisfy at least one alternative.
    OneOf(Vec<FieldKind>),
    /// Closed set of string literals.
    Enum(Vec<String>),
    /// Field may be absent.
    Optional(Box<FieldKind>),
    /// Field may be JSON `null`.
    Nullable(Box<FieldKind>),
    /// Refinement/transformation wrapper; validation applies the inner kind.
    Effects(Box<FieldKind>),
    /// Unclassifiable; accepts anything.
    Unknown,
}

impl FieldKind {
    /// Strip `Optional`/`Nullable`/`Effects` wrappers down to the base kind.
    pub fn unwrap_wrappers(&self) -> &FieldKind {
        let mut kind = self;
        loop {
            match kind {
                FieldKind::Optional(inner) | FieldKind::Nullable(inner) | FieldKind::Effects(inner) => {
                    kind = inner;
                }
                other => return other,
            }
        }
    }

    /// Whether a value for this field may be omitted entirely.
    pub fn is_optional(&self) -> bool {
        let mut kind = self;
        loop {
            match kind {
                FieldKind::Optional(_) => return true,
                FieldKind::Effects(inner) => kind = inner,
                _ => return false,
            }
        }
    }

    /// Whether JSON `null` is an acceptable value for this field.
    pub fn accepts_null(&self) -> bool {
        let mut kind = self;
        loop {
            match kind {
                FieldKind::Nullable(_) => return true,
                FieldKind::Optional(inner) | FieldKind::Effects(inner) => kind = inner,
                _ => return false,
            }
        }
    }
}

/// An object-shaped schema: field name to [`FieldKind`], in declaration
/// order. Field names are unique; insertion order is preserved so catalog
/// output is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Declared fields in registration order.
    pub fields: IndexMap<String, FieldKind>,
}

impl ObjectSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required field.
    pub fn field(mut self, name: &str, kind: FieldKind) -> Self {
        self.fields.insert(name.to_string(), kind);
        self
    }

    /// Declare an optional field; shorthand for wrapping in
    /// [`FieldKind::Optional`].
    pub fn optional(mut self, name: &str, kind: FieldKind) -> Self {
        self.fields.insert(name.to_string(), FieldKind::Optional(Box::new(kind)));
        self
    }
}
