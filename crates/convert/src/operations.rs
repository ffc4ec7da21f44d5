//! Conversion of pre-written operation documents into catalog entries.
//!
//! Unlike schema conversion this path does no traversal: each named
//! operation in the document becomes one function whose query text is the
//! operation's own source, and whose parameters come straight from its
//! variable definitions. No schema is available, so variable types are
//! classified syntactically.

use crate::describe::description_between;
use crate::error::{ConvertError, Result};
use crate::mapper::variable_argument;
use apollo_compiler::ast;
use apollo_compiler::parser::SourceSpan;
use std::sync::Arc;
use toolgen_catalog::{
    ApiFunction, ApiQuery, FunctionDefinition, QueryExecutor, VoidQueryExecutor,
};

/// Converts a document of free-standing operations into catalog entries.
pub struct OperationConverter {
    executor: Arc<dyn QueryExecutor>,
}

impl Default for OperationConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationConverter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            executor: Arc::new(VoidQueryExecutor),
        }
    }

    /// Binds the executor that catalog entries will run against.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn QueryExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Converts every operation in `source` into a catalog entry.
    ///
    /// The whole document is rejected on a syntax error, when it contains
    /// no definitions, or when any definition is not a query or mutation
    /// operation.
    pub fn convert(&self, source: &str) -> Result<Vec<ApiFunction>> {
        let document = ast::Document::parse(source, "operations.graphql")
            .map_err(|with_errors| ConvertError::Syntax(with_errors.errors.to_string()))?;
        if document.definitions.is_empty() {
            return Err(ConvertError::EmptyDocument);
        }

        let mut functions = Vec::new();
        // Tracks the end of the previous operation so each description scan
        // only sees the gap between two adjacent operations.
        let mut previous_end = 0;
        for definition in &document.definitions {
            let operation = match definition {
                ast::Definition::OperationDefinition(operation) => operation,
                other => {
                    return Err(ConvertError::UnexpectedDefinition {
                        kind: definition_kind(other),
                    });
                }
            };
            if operation.operation_type == ast::OperationType::Subscription {
                return Err(ConvertError::UnsupportedOperation {
                    name: operation
                        .name
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                });
            }

            let name = operation
                .name
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            let description = description_between(
                source,
                operation.location().map(|loc| loc.offset()),
                previous_end,
            );
            let mut function = FunctionDefinition::new(name, description);

            // Each variable's comment scan is bounded below by the previous
            // variable (or the operation start), so descriptions cannot leak
            // between variables.
            let mut variable_lower = operation.location().map_or(0, |loc| loc.offset());
            for variable in &operation.variables {
                let argument = variable_argument(&variable.ty).with_description(
                    description_between(
                        source,
                        variable.location().map(|loc| loc.offset()),
                        variable_lower,
                    ),
                );
                function.parameters.insert(
                    variable.name.to_string(),
                    argument,
                    variable.ty.is_non_null(),
                );
                if let Some(location) = variable.location() {
                    variable_lower = location.end_offset();
                }
            }

            let query = operation_source(source, operation.location());
            if let Some(location) = operation.location() {
                previous_end = location.end_offset();
            }
            functions.push(ApiFunction::new(
                function,
                ApiQuery::new(query),
                Arc::clone(&self.executor),
            )?);
        }
        tracing::debug!(functions = functions.len(), "operation conversion complete");
        Ok(functions)
    }
}

fn definition_kind(definition: &ast::Definition) -> &'static str {
    match definition {
        ast::Definition::FragmentDefinition(_) => "fragment definition",
        _ => "type system definition",
    }
}

/// Extracts an operation's own source text, with comments stripped.
///
/// Lines containing a `#` are truncated at it, trimmed on both ends, and
/// dropped entirely if nothing remains; other lines are kept verbatim.
fn operation_source(source: &str, location: Option<SourceSpan>) -> String {
    let Some(location) = location else {
        return source.trim().to_string();
    };
    let text = source
        .get(location.offset()..location.end_offset())
        .unwrap_or(source);
    let mut lines = Vec::new();
    for line in text.lines() {
        if let Some(pos) = line.find('#') {
            let kept = line[..pos].trim();
            if !kept.is_empty() {
                lines.push(kept);
            }
        } else if !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolgen_catalog::JsonType;

    fn convert(source: &str) -> Vec<ApiFunction> {
        OperationConverter::new().convert(source).unwrap()
    }

    #[test]
    fn test_named_query_with_variables() {
        let functions = convert(
            "query GetWidgets($limit: Int!, $after: String) {\n  widgets(limit: $limit, after: $after) { id }\n}",
        );
        assert_eq!(functions.len(), 1);
        let function = &functions[0];
        assert_eq!(function.name(), "GetWidgets");
        let parameters = &function.definition().parameters;
        assert_eq!(
            parameters.get("limit").unwrap().json_type(),
            JsonType::Integer
        );
        assert_eq!(
            parameters.get("after").unwrap().json_type(),
            JsonType::String
        );
        assert_eq!(parameters.required(), ["limit"]);
        assert!(function.query().query.starts_with("query GetWidgets"));
    }

    #[test]
    fn test_comment_description_above_operation() {
        let functions = convert(
            "# Returns widgets\nquery Widgets {\n  widgets { id }\n}",
        );
        assert_eq!(
            functions[0].definition().description.as_deref(),
            Some("Returns widgets")
        );
        assert!(!functions[0].query().query.contains('#'));
    }

    #[test]
    fn test_block_description_above_operation() {
        let functions = convert(
            "\"\"\"Returns widgets\"\"\"\nquery Widgets {\n  widgets { id }\n}",
        );
        assert_eq!(
            functions[0].definition().description.as_deref(),
            Some("Returns widgets")
        );
    }

    #[test]
    fn test_variable_comment_descriptions() {
        let functions = convert(
            "query Search(\n  # free text to match\n  $text: String!,\n  # page size\n  $limit: Int\n) {\n  search(text: $text, limit: $limit) { id }\n}",
        );
        let parameters = &functions[0].definition().parameters;
        assert_eq!(
            parameters.get("text").unwrap().description(),
            Some("free text to match")
        );
        assert_eq!(
            parameters.get("limit").unwrap().description(),
            Some("page size")
        );
    }

    #[test]
    fn test_descriptions_do_not_leak_between_operations() {
        let functions = convert(
            "# first one\nquery A { a }\n\nquery B { b }",
        );
        assert_eq!(functions.len(), 2);
        assert_eq!(
            functions[0].definition().description.as_deref(),
            Some("first one")
        );
        assert_eq!(functions[1].definition().description, None);
    }

    #[test]
    fn test_comment_lines_stripped_from_query_text() {
        let functions = convert(
            "query A {\n  a # trailing note\n  # whole-line note\n  b\n}",
        );
        // Comment-truncated lines are trimmed on both ends; untouched lines
        // keep their indentation.
        let query = &functions[0].query().query;
        assert_eq!(query, "query A {\na\n  b\n}");
    }

    #[test]
    fn test_anonymous_operation_gets_empty_name() {
        let functions = convert("{ widgets { id } }");
        assert_eq!(functions[0].name(), "");
    }

    #[test]
    fn test_mutation_converts() {
        let functions = convert(
            "mutation AddWidget($name: String!) {\n  addWidget(name: $name) { id }\n}",
        );
        assert_eq!(functions[0].name(), "AddWidget");
        assert!(functions[0].query().query.starts_with("mutation AddWidget"));
    }

    #[test]
    fn test_list_variable_maps_to_array() {
        let functions = convert(
            "query ByIds($ids: [ID!]!) {\n  byIds(ids: $ids) { id }\n}",
        );
        let argument = functions[0]
            .definition()
            .parameters
            .get("ids")
            .unwrap();
        assert_eq!(argument.json_type(), JsonType::Array);
        assert_eq!(argument.items().unwrap().json_type(), JsonType::String);
    }

    #[test]
    fn test_subscription_is_rejected() {
        let error = OperationConverter::new()
            .convert("subscription Watch { events { id } }")
            .unwrap_err();
        assert!(matches!(
            error,
            ConvertError::UnsupportedOperation { name } if name == "Watch"
        ));
    }

    #[test]
    fn test_fragment_is_rejected() {
        let error = OperationConverter::new()
            .convert("fragment F on T { id }\nquery A { a }")
            .unwrap_err();
        assert!(matches!(
            error,
            ConvertError::UnexpectedDefinition { kind: "fragment definition" }
        ));
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let error = OperationConverter::new().convert("  \n").unwrap_err();
        assert!(matches!(error, ConvertError::EmptyDocument));
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let error = OperationConverter::new().convert("query {").unwrap_err();
        assert!(matches!(error, ConvertError::Syntax(_)));
    }
}
