//! Function catalog data model for LLM tool calling.
//!
//! This crate defines the output side of the converter pipeline: the
//! JSON-schema-shaped [`FunctionDefinition`] consumed by LLM tool-calling
//! interfaces, the [`ApiQuery`] template it is paired with, and the
//! [`QueryExecutor`] boundary that runs a query against a live API.
//!
//! A [`ApiFunction`] ties the three together into one catalog entry:
//!
//! ```
//! use std::sync::Arc;
//! use toolgen_catalog::{
//!     ApiFunction, ApiQuery, FunctionArgument, FunctionDefinition, JsonType, VoidQueryExecutor,
//! };
//!
//! let mut definition = FunctionDefinition::new("character", Some("Look up a character".into()));
//! definition
//!     .parameters
//!     .insert("id", FunctionArgument::scalar(JsonType::String), true);
//!
//! let query = ApiQuery::new("query character($id: ID!) {\ncharacter(id: $id) {\nid\n}\n}");
//! let entry = ApiFunction::new(definition, query, Arc::new(VoidQueryExecutor)).unwrap();
//! assert_eq!(entry.name(), "character");
//! ```

mod definition;
mod executor;
mod function;

pub use definition::{ApiQuery, FunctionArgument, FunctionDefinition, FunctionParameters, JsonType};
pub use executor::{
    validate_arguments, ExecutorError, JsonMap, QueryExecutor, ValidationErrorKind,
    ValidationResult, VoidQueryExecutor,
};
pub use function::{ApiFunction, CatalogError};
