//! Schema descriptor: normalized type labels for catalog output.
//!
//! Labels come from a closed vocabulary: `String`, `Number`, `Boolean`,
//! `Object`, `Array<T>`, `Enum<[a, b]>`, `Union<T | U>`, wrapped as needed
//! in `Optional<…>`, `Nullable<…>` or `Effects<…>`, with `UnknownType` for
//! anything unclassifiable. Nested object fields collapse to the opaque
//! `Object` label — the descriptor is deliberately shallow, and catalog
//! consumers rely on that.

use indexmap::IndexMap;
use switchboard_types::{FieldKind, ObjectSchema};

/// Describe a top-level schema as a field-name to type-label mapping.
///
/// Top-level `Optional`/`Nullable` wrappers are substituted with their inner
/// schema, and `Effects` wrappers unwrap iteratively, before processing. A
/// schema that is not object-shaped after unwrapping yields an empty mapping;
/// that is documented behavior, not an error, and nothing here panics.
pub fn describe_schema(schema: &FieldKind) -> IndexMap<String, String> {
    match schema.unwrap_wrappers() {
        FieldKind::Obj(object) => describe_object(object),
        _ => IndexMap::new(),
    }
}

fn describe_object(schema: &ObjectSchema) -> IndexMap<String, String> {
    schema
        .fields
        .iter()
        .map(|(name, kind)| (name.clone(), field_label(kind)))
        .collect()
}

/// Compute the full descriptor label for one field's kind.
pub fn field_label(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Optional(inner) => format!("Optional<{}>", field_label(inner)),
        FieldKind::Nullable(inner) => format!("Nullable<{}>", field_label(inner)),
        FieldKind::Effects(inner) => format!("Effects<{}>", field_label(inner)),
        FieldKind::Str => "String".to_string(),
        FieldKind::Num => "Number".to_string(),
        FieldKind::Bool => "Boolean".to_string(),
        FieldKind::Obj(_) => "Object".to_string(),
        FieldKind::Arr(element) => format!("Array<{}>", base_label(element)),
        FieldKind::OneOf(alternatives) => {
            let joined = alternatives.iter().map(base_label).collect::<Vec<_>>().join(" | ");
            format!("Union<{joined}>")
        }
        FieldKind::Enum(literals) => format!("Enum<[{}]>", literals.join(", ")),
        FieldKind::Unknown => "UnknownType".to_string(),
    }
}

/// Base-kind label with wrappers stripped; used for array elements and
/// union alternatives, which report only the underlying kind.
fn base_label(kind: &FieldKind) -> &'static str {
    match kind.unwrap_wrappers() {
        FieldKind::Str => "String",
        FieldKind::Num => "Number",
        FieldKind::Bool => "Boolean",
        FieldKind::Obj(_) => "Object",
        FieldKind::Arr(_) => "Array",
        FieldKind::OneOf(_) => "Union",
        FieldKind::Enum(_) => "Enum",
        _ => "UnknownType",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_types::ObjectSchema;

    fn object(schema: ObjectSchema) -> FieldKind {
        FieldKind::Obj(schema)
    }

    #[test]
    fn base_kinds_map_to_fixed_labels() {
        let schema = object(
            ObjectSchema::new()
                .field("email", FieldKind::Str)
                .field("count", FieldKind::Num)
                .field("active", FieldKind::Bool),
        );
        let shape = describe_schema(&schema);
        assert_eq!(shape["email"], "String");
        assert_eq!(shape["count"], "Number");
        assert_eq!(shape["active"], "Boolean");
    }

    #[test]
    fn optional_field_wraps_inner_label() {
        let schema = object(ObjectSchema::new().optional("limit", FieldKind::Num));
        assert_eq!(describe_schema(&schema)["limit"], "Optional<Number>");
    }

    #[test]
    fn nullable_and_effects_wrap_inner_label() {
        let schema = object(
            ObjectSchema::new()
                .field("phone", FieldKind::Nullable(Box::new(FieldKind::Str)))
                .field("slug", FieldKind::Effects(Box::new(FieldKind::Str))),
        );
        let shape = describe_schema(&schema);
        assert_eq!(shape["phone"], "Nullable<String>");
        assert_eq!(shape["slug"], "Effects<String>");
    }

    #[test]
    fn nested_objects_collapse_to_opaque_label() {
        let schema = object(ObjectSchema::new().field(
            "properties",
            FieldKind::Obj(ObjectSchema::new().field("plan", FieldKind::Str)),
        ));
        assert_eq!(describe_schema(&schema)["properties"], "Object");
    }

    #[test]
    fn arrays_report_the_element_base_kind() {
        let schema = object(
            ObjectSchema::new()
                .field("tags", FieldKind::Arr(Box::new(FieldKind::Str)))
                .field(
                    "items",
                    FieldKind::Arr(Box::new(FieldKind::Obj(ObjectSchema::new()))),
                )
                .field(
                    "scores",
                    FieldKind::Arr(Box::new(FieldKind::Optional(Box::new(FieldKind::Num)))),
                ),
        );
        let shape = describe_schema(&schema);
        assert_eq!(shape["tags"], "Array<String>");
        assert_eq!(shape["items"], "Array<Object>");
        assert_eq!(shape["scores"], "Array<Number>");
    }

    #[test]
    fn unions_join_alternative_base_kinds() {
        let schema = object(ObjectSchema::new().field(
            "product_id",
            FieldKind::OneOf(vec![FieldKind::Str, FieldKind::Num]),
        ));
        assert_eq!(describe_schema(&schema)["product_id"], "Union<String | Number>");
    }

    #[test]
    fn enums_list_their_literals() {
        let schema = object(ObjectSchema::new().field(
            "status",
            FieldKind::Enum(vec!["draft".into(), "open".into(), "paid".into()]),
        ));
        assert_eq!(describe_schema(&schema)["status"], "Enum<[draft, open, paid]>");
    }

    #[test]
    fn unclassifiable_fields_degrade_to_unknown_type() {
        let schema = object(ObjectSchema::new().field("blob", FieldKind::Unknown));
        assert_eq!(describe_schema(&schema)["blob"], "UnknownType");
    }

    #[test]
    fn top_level_optional_is_unwrapped_before_processing() {
        let inner = ObjectSchema::new().field("email", FieldKind::Str);
        let direct = describe_schema(&FieldKind::Obj(inner.clone()));
        let wrapped = describe_schema(&FieldKind::Optional(Box::new(FieldKind::Obj(inner))));
        assert_eq!(direct, wrapped);
    }

    #[test]
    fn top_level_effects_unwrap_iteratively() {
        let inner = ObjectSchema::new().field("email", FieldKind::Str);
        let wrapped = FieldKind::Effects(Box::new(FieldKind::Effects(Box::new(FieldKind::Obj(
            inner.clone(),
        )))));
        assert_eq!(describe_schema(&wrapped), describe_schema(&FieldKind::Obj(inner)));
    }

    #[test]
    fn non_object_top_level_yields_empty_shape() {
        assert!(describe_schema(&FieldKind::Str).is_empty());
        assert!(describe_schema(&FieldKind::Num).is_empty());
        assert!(describe_schema(&FieldKind::OneOf(vec![FieldKind::Str, FieldKind::Num])).is_empty());
    }

    #[test]
    fn field_order_follows_declaration_order() {
        let schema = object(
            ObjectSchema::new()
                .field("zebra", FieldKind::Str)
                .field("apple", FieldKind::Str),
        );
        let names: Vec<String> = describe_schema(&schema).keys().cloned().collect();
        assert_eq!(names, vec!["zebra", "apple"]);
    }
}
