//! SDL generation from an introspected schema.
//!
//! The converter consumes SDL text, so a fetched introspection response is
//! rendered back into schema syntax before conversion. Descriptions are
//! preserved as they feed function and parameter descriptions downstream.

use crate::types::{IntrospectionField, IntrospectionSchema, IntrospectionType};
use std::fmt::Write;

/// Built-in scalars that must not appear in generated SDL.
const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Renders an introspected schema as SDL text.
///
/// Built-in scalars and introspection types (`__`-prefixed) are skipped. A
/// `schema { ... }` block is emitted only when a root type deviates from
/// its conventional name.
#[must_use]
#[tracing::instrument(skip(schema), fields(types = schema.types.len()))]
pub fn introspection_to_sdl(schema: &IntrospectionSchema) -> String {
    let mut sdl = String::new();

    let needs_schema_def = schema
        .query_type
        .as_ref()
        .is_some_and(|t| t.name != "Query")
        || schema
            .mutation_type
            .as_ref()
            .is_some_and(|t| t.name != "Mutation")
        || schema
            .subscription_type
            .as_ref()
            .is_some_and(|t| t.name != "Subscription");

    if needs_schema_def {
        sdl.push_str("schema {\n");
        if let Some(ref query) = schema.query_type {
            writeln!(sdl, "  query: {}", query.name).unwrap();
        }
        if let Some(ref mutation) = schema.mutation_type {
            writeln!(sdl, "  mutation: {}", mutation.name).unwrap();
        }
        if let Some(ref subscription) = schema.subscription_type {
            writeln!(sdl, "  subscription: {}", subscription.name).unwrap();
        }
        sdl.push_str("}\n\n");
    }

    let mut types_written = 0;
    for type_def in &schema.types {
        let name = type_def.name();
        if name.starts_with("__") || BUILTIN_SCALARS.contains(&name) {
            continue;
        }
        write_type(&mut sdl, type_def);
        sdl.push_str("\n\n");
        types_written += 1;
    }

    tracing::debug!(types_written, sdl_length = sdl.len(), "SDL generation complete");
    sdl.trim_end().to_string()
}

fn write_type(sdl: &mut String, type_def: &IntrospectionType) {
    match type_def {
        IntrospectionType::Scalar(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            writeln!(sdl, "scalar {}", t.name).unwrap();
        }
        IntrospectionType::Object(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            write!(sdl, "type {}", t.name).unwrap();
            write_interfaces(sdl, &t.interfaces);
            write_fields(sdl, &t.fields);
        }
        IntrospectionType::Interface(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            write!(sdl, "interface {}", t.name).unwrap();
            write_interfaces(sdl, &t.interfaces);
            write_fields(sdl, &t.fields);
        }
        IntrospectionType::Union(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            write!(sdl, "union {} = ", t.name).unwrap();
            for (i, member) in t.possible_types.iter().enumerate() {
                if i > 0 {
                    sdl.push_str(" | ");
                }
                sdl.push_str(&member.name);
            }
        }
        IntrospectionType::Enum(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            writeln!(sdl, "enum {} {{", t.name).unwrap();
            for value in &t.enum_values {
                write_description(sdl, value.description.as_ref(), 1);
                writeln!(sdl, "  {}", value.name).unwrap();
            }
            sdl.push('}');
        }
        IntrospectionType::InputObject(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            writeln!(sdl, "input {} {{", t.name).unwrap();
            for field in &t.input_fields {
                write_description(sdl, field.description.as_ref(), 1);
                write!(sdl, "  {}: {}", field.name, field.type_ref.to_type_string()).unwrap();
                if let Some(default) = &field.default_value {
                    write!(sdl, " = {default}").unwrap();
                }
                sdl.push('\n');
            }
            sdl.push('}');
        }
    }
}

fn write_interfaces(sdl: &mut String, interfaces: &[crate::types::IntrospectionTypeRef]) {
    if interfaces.is_empty() {
        return;
    }
    sdl.push_str(" implements ");
    for (i, interface) in interfaces.iter().enumerate() {
        if i > 0 {
            sdl.push_str(" & ");
        }
        sdl.push_str(&interface.name);
    }
}

fn write_fields(sdl: &mut String, fields: &[IntrospectionField]) {
    if fields.is_empty() {
        sdl.push_str(" {\n}");
        return;
    }
    sdl.push_str(" {\n");
    for field in fields {
        write_field(sdl, field, 1);
    }
    sdl.push('}');
}

fn write_field(sdl: &mut String, field: &IntrospectionField, indent: usize) {
    let indent_str = "  ".repeat(indent);
    write_description(sdl, field.description.as_ref(), indent);
    write!(sdl, "{indent_str}{}", field.name).unwrap();

    if !field.args.is_empty() {
        sdl.push('(');
        for (i, arg) in field.args.iter().enumerate() {
            if i > 0 {
                sdl.push_str(", ");
            }
            write!(sdl, "{}: {}", arg.name, arg.type_ref.to_type_string()).unwrap();
            if let Some(default) = &arg.default_value {
                write!(sdl, " = {default}").unwrap();
            }
        }
        sdl.push(')');
    }

    writeln!(sdl, ": {}", field.type_ref.to_type_string()).unwrap();
}

fn write_description(sdl: &mut String, description: Option<&String>, indent: usize) {
    if let Some(desc) = description {
        let indent_str = "  ".repeat(indent);
        if desc.contains('\n') {
            writeln!(sdl, "{indent_str}\"\"\"\n{desc}\n{indent_str}\"\"\"").unwrap();
        } else {
            writeln!(sdl, "{indent_str}\"{}\"", escape_string(desc)).unwrap();
        }
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        IntrospectionInputValue, IntrospectionObjectType, IntrospectionTypeRef,
        IntrospectionTypeRefFull, TypeKind,
    };

    fn scalar_ref(name: &str) -> IntrospectionTypeRefFull {
        IntrospectionTypeRefFull {
            kind: TypeKind::Scalar,
            name: Some(name.to_string()),
            of_type: None,
        }
    }

    #[test]
    fn test_object_type_with_described_field() {
        let schema = IntrospectionSchema {
            query_type: Some(IntrospectionTypeRef {
                name: "Query".to_string(),
            }),
            mutation_type: None,
            subscription_type: None,
            types: vec![IntrospectionType::Object(IntrospectionObjectType {
                name: "Query".to_string(),
                description: None,
                fields: vec![IntrospectionField {
                    name: "version".to_string(),
                    description: Some("Current version".to_string()),
                    args: vec![],
                    type_ref: scalar_ref("String"),
                }],
                interfaces: vec![],
            })],
        };
        let sdl = introspection_to_sdl(&schema);
        assert_eq!(
            sdl,
            "type Query {\n  \"Current version\"\n  version: String\n}"
        );
    }

    #[test]
    fn test_nonstandard_root_gets_schema_block() {
        let schema = IntrospectionSchema {
            query_type: Some(IntrospectionTypeRef {
                name: "RootQuery".to_string(),
            }),
            mutation_type: None,
            subscription_type: None,
            types: vec![IntrospectionType::Object(IntrospectionObjectType {
                name: "RootQuery".to_string(),
                description: None,
                fields: vec![IntrospectionField {
                    name: "ok".to_string(),
                    description: None,
                    args: vec![],
                    type_ref: scalar_ref("Boolean"),
                }],
                interfaces: vec![],
            })],
        };
        let sdl = introspection_to_sdl(&schema);
        assert!(sdl.starts_with("schema {\n  query: RootQuery\n}"));
    }

    #[test]
    fn test_builtin_and_introspection_types_skipped() {
        let schema = IntrospectionSchema {
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            types: vec![
                IntrospectionType::Scalar(crate::types::IntrospectionScalarType {
                    name: "String".to_string(),
                    description: None,
                }),
                IntrospectionType::Scalar(crate::types::IntrospectionScalarType {
                    name: "__Type".to_string(),
                    description: None,
                }),
                IntrospectionType::Scalar(crate::types::IntrospectionScalarType {
                    name: "DateTime".to_string(),
                    description: None,
                }),
            ],
        };
        assert_eq!(introspection_to_sdl(&schema), "scalar DateTime");
    }

    #[test]
    fn test_field_arguments_with_defaults() {
        let field = IntrospectionField {
            name: "widgets".to_string(),
            description: None,
            args: vec![IntrospectionInputValue {
                name: "limit".to_string(),
                description: None,
                type_ref: scalar_ref("Int"),
                default_value: Some("10".to_string()),
            }],
            type_ref: scalar_ref("Int"),
        };
        let mut sdl = String::new();
        write_field(&mut sdl, &field, 1);
        assert_eq!(sdl, "  widgets(limit: Int = 10): Int\n");
    }
}
