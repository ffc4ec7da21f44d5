use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors raised while converting schemas or operation documents.
///
/// During whole-schema conversion the per-field kinds (`UnsupportedType`,
/// `NestedInputObject`, `NoSelectableFields`) are caught, logged, and the
/// field is dropped; for single-operation conversion every kind is fatal.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input text failed to parse as GraphQL.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// An operation document contained no definitions at all.
    #[error("operation document contains no definitions")]
    EmptyDocument,

    /// An operation document contained something other than an operation.
    #[error("expected an operation definition, but got: {kind}")]
    UnexpectedDefinition { kind: &'static str },

    /// Subscriptions are rejected outright.
    #[error("subscriptions are not supported: {name}")]
    UnsupportedOperation { name: String },

    /// An argument type is none of scalar, enum, list, or input object.
    #[error("unsupported type [{type_name}] on path '{path}'")]
    UnsupportedType { type_name: String, path: String },

    /// Input objects are flattened exactly one level deep; one nested inside
    /// another (or inside a list) cannot be expressed as flat parameters.
    #[error("nested input objects beyond one level are not supported: [{type_name}] on path '{path}'")]
    NestedInputObject { type_name: String, path: String },

    /// Cycle and depth pruning removed every child of an object-typed field,
    /// leaving an empty (invalid) selection set.
    #[error("expected at least one selectable field on path '{path}'")]
    NoSelectableFields { path: String },

    /// The produced definition was rejected by the bound executor.
    #[error(transparent)]
    Catalog(#[from] toolgen_catalog::CatalogError),
}
