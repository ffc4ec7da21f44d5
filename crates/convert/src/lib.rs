//! Converts GraphQL schemas and operation documents into catalogs of
//! LLM-callable functions.
//!
//! Two entry points cover the two source shapes:
//!
//! - [`SchemaConverter`] walks a schema's query and mutation root fields,
//!   generating a depth-bounded query for each and flattening their
//!   arguments into JSON-schema parameters.
//! - [`OperationConverter`] takes pre-written operations as-is, reading
//!   parameters from their variable definitions and descriptions from
//!   surrounding comments.
//!
//! Both produce [`toolgen_catalog::ApiFunction`] values bound to a
//! [`toolgen_catalog::QueryExecutor`].
//!
//! ```
//! use toolgen_convert::{convert_schema, ConverterConfig};
//!
//! let sdl = "
//!     type Query { character(id: ID!): Character }
//!     type Character { id: ID! name: String }
//! ";
//! let functions = convert_schema(sdl, ConverterConfig::default()).unwrap();
//! assert_eq!(functions[0].name(), "character");
//! ```

mod config;
mod context;
mod describe;
mod error;
mod mapper;
mod operations;
mod schema;

pub use config::{ignore_prefix_filter, ConverterConfig, OperationFilter, OperationKind, DEFAULT_MAX_DEPTH};
pub use error::{ConvertError, Result};
pub use operations::OperationConverter;
pub use schema::SchemaConverter;

use std::sync::Arc;
use toolgen_catalog::{ApiFunction, QueryExecutor};

/// Converts SDL text into a catalog with the default (void) executor.
pub fn convert_schema(sdl: &str, config: ConverterConfig) -> Result<Vec<ApiFunction>> {
    Ok(SchemaConverter::parse(sdl)?.with_config(config).convert())
}

/// Converts SDL text into a catalog bound to `executor`.
pub fn convert_schema_with_executor(
    sdl: &str,
    config: ConverterConfig,
    executor: Arc<dyn QueryExecutor>,
) -> Result<Vec<ApiFunction>> {
    Ok(SchemaConverter::parse(sdl)?
        .with_config(config)
        .with_executor(executor)
        .convert())
}

/// Converts an operation document into a catalog with the default executor.
pub fn convert_operations(source: &str) -> Result<Vec<ApiFunction>> {
    OperationConverter::new().convert(source)
}

/// Converts an operation document into a catalog bound to `executor`.
pub fn convert_operations_with_executor(
    source: &str,
    executor: Arc<dyn QueryExecutor>,
) -> Result<Vec<ApiFunction>> {
    OperationConverter::new().with_executor(executor).convert(source)
}
