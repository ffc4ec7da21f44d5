//! Pure mapping from GraphQL types to JSON-schema parameter shapes.
//!
//! Two closed matches live here: one over syntactic [`ast::Type`] nodes (for
//! operation variables, where no schema is available) and one over resolved
//! [`ExtendedType`]s (for schema arguments). Everything unclassifiable falls
//! into a checked error arm rather than a scattered conditional.

use crate::error::{ConvertError, Result};
use apollo_compiler::ast;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::Schema;
use toolgen_catalog::{FunctionArgument, JsonType};

/// Maps a GraphQL scalar name to its JSON schema type.
///
/// `Int` → integer, `Float` → number, `String`/`ID` → string, `Boolean` →
/// boolean; custom or unrecognized scalars fall back to string.
pub(crate) fn scalar_json_type(name: &str) -> JsonType {
    match name {
        "Int" => JsonType::Integer,
        "Float" => JsonType::Number,
        "Boolean" => JsonType::Boolean,
        _ => JsonType::String,
    }
}

/// Peels exactly one level of NonNull, reporting whether it was present.
pub(crate) fn unwrap_required(ty: &ast::Type) -> (ast::Type, bool) {
    match ty {
        ast::Type::NonNullNamed(name) => (ast::Type::Named(name.clone()), true),
        ast::Type::NonNullList(inner) => (ast::Type::List(inner.clone()), true),
        other => (other.clone(), false),
    }
}

/// Maps an operation variable's declared type to a parameter argument.
///
/// Without a schema, named types can only be classified by the builtin
/// scalar names; anything else (custom scalars, enums, input objects) maps
/// to a plain string.
pub(crate) fn variable_argument(ty: &ast::Type) -> FunctionArgument {
    match ty {
        ast::Type::Named(name) | ast::Type::NonNullNamed(name) => {
            FunctionArgument::scalar(scalar_json_type(name.as_str()))
        }
        ast::Type::List(inner) | ast::Type::NonNullList(inner) => {
            FunctionArgument::array(variable_argument(inner))
        }
    }
}

/// Maps a schema argument type to a parameter argument.
///
/// The caller has already peeled required-ness and decided whether to
/// flatten an input object; an input object reaching this function sits
/// more than one flattening level deep and is a dedicated error.
pub(crate) fn input_argument(schema: &Schema, ty: &ast::Type, path: &str) -> Result<FunctionArgument> {
    match ty {
        ast::Type::List(inner) | ast::Type::NonNullList(inner) => {
            let (item, _required) = unwrap_required(inner);
            Ok(FunctionArgument::array(input_argument(schema, &item, path)?))
        }
        ast::Type::Named(name) | ast::Type::NonNullNamed(name) => match schema.types.get(name) {
            Some(ExtendedType::Scalar(_)) | None => {
                Ok(FunctionArgument::scalar(scalar_json_type(name.as_str())))
            }
            Some(ExtendedType::Enum(enum_type)) => Ok(FunctionArgument::enumeration(
                enum_type.values.keys().map(ToString::to_string).collect(),
            )),
            Some(ExtendedType::InputObject(_)) => Err(ConvertError::NestedInputObject {
                type_name: name.to_string(),
                path: path.to_string(),
            }),
            Some(ExtendedType::Object(_) | ExtendedType::Interface(_) | ExtendedType::Union(_)) => {
                Err(ConvertError::UnsupportedType {
                    type_name: name.to_string(),
                    path: path.to_string(),
                })
            }
        },
    }
}
