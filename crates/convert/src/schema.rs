//! Schema conversion: walk a schema's root fields into catalog entries.
//!
//! The converter parses SDL once, then visits every query and mutation root
//! field. Each visit recursively builds a depth-bounded selection set and a
//! flat parameter list: object-typed fields expand into nested selections
//! until a cycle or the depth ceiling cuts the branch off, and input-object
//! arguments are flattened one level into sibling parameters with combined
//! names (`filter` with fields `name`, `status` becomes `filter_name`,
//! `filter_status`).

use crate::config::{ConverterConfig, OperationKind};
use crate::context::{combine_names, VisitContext};
use crate::describe::description_between;
use crate::error::{ConvertError, Result};
use crate::mapper::{input_argument, unwrap_required};
use apollo_compiler::ast::{self, FieldDefinition};
use apollo_compiler::schema::{Component, ExtendedType, InputObjectType};
use apollo_compiler::{Node, Schema};
use std::fmt::Write;
use std::sync::Arc;
use toolgen_catalog::{
    ApiFunction, ApiQuery, FunctionArgument, FunctionDefinition, QueryExecutor, VoidQueryExecutor,
};

/// Everything one recursive visit produced, merged upward at each parent.
///
/// Returning per-call lists instead of mutating shared accumulators keeps
/// sibling branches fully independent; the declarations are joined with
/// `", "` only at final assembly.
#[derive(Debug, Default)]
struct VisitOutput {
    /// `$name: Type` variable declarations, one per flattened parameter.
    variables: Vec<String>,
    /// Flattened parameters in first-seen order.
    parameters: Vec<ParameterEntry>,
    /// Selection-set text contributed by this field.
    body: String,
}

#[derive(Debug)]
struct ParameterEntry {
    name: String,
    argument: FunctionArgument,
    required: bool,
}

/// Converts a GraphQL schema into a catalog of callable functions.
///
/// ```
/// use toolgen_convert::SchemaConverter;
///
/// let sdl = "
///     type Query { character(id: ID!): Character }
///     type Character { id: ID! name: String }
/// ";
/// let functions = SchemaConverter::parse(sdl).unwrap().convert();
/// assert_eq!(functions.len(), 1);
/// assert_eq!(functions[0].name(), "character");
/// ```
pub struct SchemaConverter {
    schema: Schema,
    source: String,
    config: ConverterConfig,
    executor: Arc<dyn QueryExecutor>,
}

impl std::fmt::Debug for SchemaConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaConverter")
            .field("schema", &self.schema)
            .field("source", &self.source)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SchemaConverter {
    /// Parses SDL text. Syntax errors are fatal for the whole conversion.
    pub fn parse(sdl: &str) -> Result<Self> {
        let schema = Schema::parse(sdl, "schema.graphql")
            .map_err(|with_errors| ConvertError::Syntax(with_errors.errors.to_string()))?;
        Ok(Self {
            schema,
            source: sdl.to_string(),
            config: ConverterConfig::default(),
            executor: Arc::new(VoidQueryExecutor),
        })
    }

    #[must_use]
    pub fn with_config(mut self, config: ConverterConfig) -> Self {
        self.config = config;
        self
    }

    /// Binds the executor that catalog entries will run against.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn QueryExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Converts every surviving root field into a catalog entry.
    ///
    /// Fields rejected by the operation filter are silently omitted;
    /// fields that fail conversion are logged and dropped so one bad field
    /// never aborts the whole schema.
    #[must_use]
    #[tracing::instrument(skip(self))]
    pub fn convert(&self) -> Vec<ApiFunction> {
        let mut functions = Vec::new();
        for kind in [OperationKind::Query, OperationKind::Mutation] {
            let Some(root_name) = self.schema.root_operation(operation_type(kind)) else {
                continue;
            };
            let Some(root) = self.schema.get_object(root_name) else {
                continue;
            };
            // Lower bound for the comment-description scan; advances past
            // every field, filtered or not, so comments never leak between
            // siblings.
            let mut previous_end = root.location().map_or(0, |loc| loc.offset());
            for field in root.fields.values() {
                if self.config.allows(kind, &field.name) {
                    match self.convert_field(kind, field, previous_end) {
                        Ok(function) => functions.push(function),
                        Err(error) => {
                            tracing::warn!(field = %field.name, %error, "error converting root field, dropping it");
                        }
                    }
                }
                if let Some(location) = field.node.location() {
                    previous_end = location.end_offset();
                }
            }
        }
        tracing::debug!(functions = functions.len(), "schema conversion complete");
        functions
    }

    /// Builds one catalog entry for a root field.
    fn convert_field(
        &self,
        kind: OperationKind,
        field: &Component<FieldDefinition>,
        lower_bound: usize,
    ) -> Result<ApiFunction> {
        let context = VisitContext::root(kind.keyword(), &field.name);
        let output = self
            .visit(field, &context)?
            .ok_or_else(|| ConvertError::NoSelectableFields {
                path: context.operation_path().to_string(),
            })?;

        let description = field
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from)
            .or_else(|| {
                description_between(
                    &self.source,
                    field.node.location().map(|loc| loc.offset()),
                    lower_bound,
                )
            });
        let mut definition = FunctionDefinition::new(field.name.as_str(), description);
        for entry in output.parameters {
            definition
                .parameters
                .insert(entry.name, entry.argument, entry.required);
        }

        let body = output.body.trim_end();
        // GraphQL forbids empty variable-definition parens, so they are
        // emitted only when at least one declaration exists.
        let query = if output.variables.is_empty() {
            format!("{} {} {{\n{}\n}}", kind.keyword(), field.name, body)
        } else {
            format!(
                "{} {}({}) {{\n{}\n}}",
                kind.keyword(),
                field.name,
                output.variables.join(", "),
                body
            )
        };

        Ok(ApiFunction::new(
            definition,
            ApiQuery::new(query),
            Arc::clone(&self.executor),
        )?)
    }

    /// Recursively visits one field, producing its selection text, variable
    /// declarations, and flattened parameters.
    ///
    /// Returns `Ok(None)` when the branch is pruned by cycle detection or
    /// the depth ceiling; the parent then simply omits it. An object-typed
    /// field whose children were *all* pruned is an error — it would emit an
    /// empty selection set, which is invalid GraphQL.
    fn visit(
        &self,
        field: &Component<FieldDefinition>,
        context: &VisitContext,
    ) -> Result<Option<VisitOutput>> {
        let type_name = field.ty.inner_named_type();
        let object = match self.schema.types.get(type_name) {
            Some(ExtendedType::Object(object)) => Some(object),
            // Abstract output types cannot be selected without inline
            // fragments, which generated queries never contain.
            Some(ExtendedType::Interface(_) | ExtendedType::Union(_)) => {
                return Err(ConvertError::UnsupportedType {
                    type_name: type_name.to_string(),
                    path: context.operation_path().to_string(),
                });
            }
            _ => None,
        };

        if object.is_some() {
            if context.has_visited(type_name) {
                self.log_pruned(context, "cycle detected, aborting traversal");
                return Ok(None);
            }
            if context.depth() + 1 > self.config.max_depth() {
                self.log_pruned(context, "depth limit exceeded, aborting traversal");
                return Ok(None);
            }
        }

        let mut output = VisitOutput::default();
        output.body.push_str(&field.name);

        if !field.arguments.is_empty() {
            output.body.push('(');
            let field_start = field.node.location().map(|loc| loc.offset());
            for (index, argument) in field.arguments.iter().enumerate() {
                if index > 0 {
                    output.body.push_str(", ");
                }
                let (unwrapped, required) = unwrap_required(&argument.ty);
                if let Some(input) = self.input_object(&unwrapped) {
                    self.flatten_input_object(argument, input, context, &mut output)?;
                } else {
                    let flat_name = combine_names(context.prefix(), &argument.name);
                    let mapped =
                        input_argument(&self.schema, &unwrapped, context.operation_path())?
                            .with_description(self.node_description(
                                argument.description.as_deref(),
                                argument.location().map(|loc| loc.offset()),
                                field_start,
                            ));
                    write!(output.body, "{}: ${flat_name}", argument.name).unwrap();
                    output.variables.push(format!("${flat_name}: {}", &*argument.ty));
                    output.parameters.push(ParameterEntry {
                        name: flat_name,
                        argument: mapped,
                        required,
                    });
                }
            }
            output.body.push(')');
        }

        if let Some(object) = object {
            output.body.push_str(" {\n");
            let mut selected_any = false;
            for child in object.fields.values() {
                let child_context = context.nested(&child.name, type_name.clone());
                if let Some(child_output) = self.visit(child, &child_context)? {
                    output.variables.extend(child_output.variables);
                    output.parameters.extend(child_output.parameters);
                    output.body.push_str(&child_output.body);
                    selected_any = true;
                }
            }
            if !selected_any {
                return Err(ConvertError::NoSelectableFields {
                    path: context.operation_path().to_string(),
                });
            }
            output.body.push('}');
        }

        output.body.push('\n');
        Ok(Some(output))
    }

    /// Flattens one input-object argument's own fields into sibling
    /// parameters: `filter: { name: $filter_name, status: $filter_status }`.
    /// A second input object nested inside is a dedicated error rather than
    /// a deeper flattening.
    fn flatten_input_object(
        &self,
        argument: &Node<ast::InputValueDefinition>,
        input: &Node<InputObjectType>,
        context: &VisitContext,
        output: &mut VisitOutput,
    ) -> Result<()> {
        let input_start = input.location().map(|loc| loc.offset());
        let argument_prefix = combine_names(context.prefix(), &argument.name);
        write!(output.body, "{}: {{ ", argument.name).unwrap();
        for (index, field) in input.fields.values().enumerate() {
            let (unwrapped, required) = unwrap_required(&field.ty);
            if let Some(nested) = self.input_object(&unwrapped) {
                return Err(ConvertError::NestedInputObject {
                    type_name: nested.name.to_string(),
                    path: context.operation_path().to_string(),
                });
            }
            let flat_name = combine_names(&argument_prefix, &field.name);
            let mapped = input_argument(&self.schema, &unwrapped, context.operation_path())?
                .with_description(self.node_description(
                    field.description.as_deref(),
                    field.node.location().map(|loc| loc.offset()),
                    input_start,
                ));
            if index > 0 {
                output.body.push_str(", ");
            }
            write!(output.body, "{}: ${flat_name}", field.name).unwrap();
            output.variables.push(format!("${flat_name}: {}", &*field.ty));
            output.parameters.push(ParameterEntry {
                name: flat_name,
                argument: mapped,
                required,
            });
        }
        output.body.push_str(" }");
        Ok(())
    }

    /// Declared SDL description, or the `#`-comment heuristic between the
    /// node and its parent as a fallback.
    fn node_description(
        &self,
        declared: Option<&str>,
        node_start: Option<usize>,
        parent_start: Option<usize>,
    ) -> Option<String> {
        declared
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from)
            .or_else(|| {
                description_between(&self.source, node_start, parent_start.unwrap_or(0))
            })
    }

    fn input_object(&self, ty: &ast::Type) -> Option<&Node<InputObjectType>> {
        match ty {
            ast::Type::Named(name) => match self.schema.types.get(name) {
                Some(ExtendedType::InputObject(input)) => Some(input),
                _ => None,
            },
            _ => None,
        }
    }

    fn log_pruned(&self, context: &VisitContext, reason: &'static str) {
        if self.config.verbose() {
            tracing::info!(path = %context.operation_path(), reason, "pruning branch");
        } else {
            tracing::debug!(path = %context.operation_path(), reason, "pruning branch");
        }
    }
}

fn operation_type(kind: OperationKind) -> ast::OperationType {
    match kind {
        OperationKind::Query => ast::OperationType::Query,
        OperationKind::Mutation => ast::OperationType::Mutation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolgen_catalog::JsonType;

    fn convert(sdl: &str) -> Vec<ApiFunction> {
        SchemaConverter::parse(sdl).unwrap().convert()
    }

    #[test]
    fn test_character_scenario() {
        let functions = convert(
            "type Query { character(id: ID!): Character }\n\
             type Character { id: ID! name: String }",
        );
        assert_eq!(functions.len(), 1);
        let function = &functions[0];
        assert_eq!(function.name(), "character");
        assert_eq!(
            function.definition().parameters.get("id").unwrap().json_type(),
            JsonType::String
        );
        assert_eq!(function.definition().parameters.required(), ["id"]);
        assert_eq!(
            function.query().query,
            "query character($id: ID!) {\ncharacter(id: $id) {\nid\nname\n}\n}"
        );
    }

    #[test]
    fn test_scalar_root_field_without_arguments() {
        let functions = convert("type Query { version: String }");
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].query().query, "query version {\nversion\n}");
    }

    #[test]
    fn test_mutation_root_follows_queries() {
        let functions = convert(
            "type Query { a: Int }\n\
             type Mutation { b(x: Int!): Int }",
        );
        let names: Vec<_> = functions.iter().map(ApiFunction::name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(functions[1].query().query.starts_with("mutation b($x: Int!)"));
    }

    #[test]
    fn test_operation_filter_omits_fields() {
        let converter = SchemaConverter::parse("type Query { a: Int b: Int }")
            .unwrap()
            .with_config(
                ConverterConfig::new().with_operation_filter(|_kind, name| name != "a"),
            );
        let functions = converter.convert();
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name(), "b");
    }

    #[test]
    fn test_input_object_flattening() {
        let functions = convert(
            "type Query { widgets(filter: WidgetFilter): Widget }\n\
             type Widget { id: ID }\n\
             input WidgetFilter { name: String status: String }",
        );
        let function = &functions[0];
        let names: Vec<_> = function.definition().parameters.names().collect();
        assert_eq!(names, vec!["filter_name", "filter_status"]);
        assert!(function.definition().parameters.get("filter").is_none());
        assert!(function
            .query()
            .query
            .contains("filter: { name: $filter_name, status: $filter_status }"));
        assert!(function
            .query()
            .query
            .contains("($filter_name: String, $filter_status: String)"));
    }

    #[test]
    fn test_required_flattened_field_is_required_parameter() {
        let functions = convert(
            "type Query { widgets(filter: WidgetFilter!): Int }\n\
             input WidgetFilter { name: String! limit: Int }",
        );
        let parameters = &functions[0].definition().parameters;
        assert_eq!(parameters.required(), ["filter_name"]);
        assert_eq!(parameters.get("filter_limit").unwrap().json_type(), JsonType::Integer);
    }

    #[test]
    fn test_nested_input_object_drops_field() {
        // The offending field is dropped, the rest of the schema survives.
        let functions = convert(
            "type Query { bad(f: Outer): Int good: Int }\n\
             input Outer { inner: Inner }\n\
             input Inner { x: Int }",
        );
        let names: Vec<_> = functions.iter().map(ApiFunction::name).collect();
        assert_eq!(names, vec!["good"]);
    }

    #[test]
    fn test_abstract_output_type_drops_field() {
        let functions = convert(
            "type Query { node: Node good: Int }\n\
             interface Node { id: ID }",
        );
        let names: Vec<_> = functions.iter().map(ApiFunction::name).collect();
        assert_eq!(names, vec!["good"]);
    }

    #[test]
    fn test_unreachable_object_field_is_dropped() {
        // Every child of A is pruned by cycle detection, leaving an empty
        // selection set, so the field errors out and is dropped while the
        // rest of the schema converts.
        let functions = convert(
            "type Query { a: A ok: Int }\n\
             type A { self: A }",
        );
        let names: Vec<_> = functions.iter().map(ApiFunction::name).collect();
        assert_eq!(names, vec!["ok"]);
    }

    #[test]
    fn test_unreachable_object_is_fatal_error() {
        let converter = SchemaConverter::parse(
            "type Query { a: A }\n\
             type A { self: A }",
        )
        .unwrap();
        let root = converter.schema.get_object("Query").unwrap();
        let field = root.fields.values().next().unwrap();
        let error = converter
            .convert_field(OperationKind::Query, field, 0)
            .unwrap_err();
        assert!(matches!(
            error,
            ConvertError::NoSelectableFields { path } if path == "query.a"
        ));
    }

    #[test]
    fn test_cycle_branch_is_omitted() {
        let functions = convert(
            "type Query { node: Node }\n\
             type Node { id: ID! children: [Node] }",
        );
        assert_eq!(functions.len(), 1);
        let query = &functions[0].query().query;
        assert!(!query.contains("children"));
        assert_eq!(query, "query node {\nnode {\nid\n}\n}");
    }

    #[test]
    fn test_depth_limit_prunes_deep_branches() {
        let sdl = "type Query { a: A }\n\
                   type A { id: ID b: B }\n\
                   type B { id: ID c: C }\n\
                   type C { id: ID d: D }\n\
                   type D { id: ID }";
        let shallow = SchemaConverter::parse(sdl)
            .unwrap()
            .with_config(ConverterConfig::new().with_max_depth(2))
            .convert();
        assert!(shallow[0].query().query.contains("b {"));
        assert!(!shallow[0].query().query.contains("c {"));

        let deep = SchemaConverter::parse(sdl)
            .unwrap()
            .with_config(ConverterConfig::new().with_max_depth(4))
            .convert();
        assert!(deep[0].query().query.contains("d {"));
    }

    #[test]
    fn test_arguments_below_the_root_are_prefixed() {
        let functions = convert(
            "type Query { character(id: ID!): Character }\n\
             type Character { id: ID! friends(limit: Int): Friend }\n\
             type Friend { id: ID }",
        );
        let function = &functions[0];
        let names: Vec<_> = function.definition().parameters.names().collect();
        assert_eq!(names, vec!["id", "friends_limit"]);
        assert!(function
            .query()
            .query
            .starts_with("query character($id: ID!, $friends_limit: Int)"));
        assert!(function.query().query.contains("friends(limit: $friends_limit)"));
    }

    #[test]
    fn test_descriptions_carried_from_sdl() {
        let functions = convert(
            "type Query {\n\
             \"\"\"Look up one character\"\"\"\n\
             character(\n\
             # the character id\n\
             id: ID!): Character\n\
             }\n\
             type Character { id: ID }",
        );
        let function = &functions[0];
        assert_eq!(
            function.definition().description.as_deref(),
            Some("Look up one character")
        );
        assert_eq!(
            function.definition().parameters.get("id").unwrap().description(),
            Some("the character id")
        );
    }

    #[test]
    fn test_comment_fallback_for_undocumented_root_field() {
        let functions = convert(
            "type Query {\n\
             a: Int\n\
             # number of widgets\n\
             widgetCount: Int\n\
             }",
        );
        assert_eq!(functions[0].definition().description, None);
        assert_eq!(
            functions[1].definition().description.as_deref(),
            Some("number of widgets")
        );
    }

    #[test]
    fn test_enum_argument_lists_values() {
        let functions = convert(
            "type Query { widgets(status: Status!): Int }\n\
             enum Status { ACTIVE RETIRED }",
        );
        let argument = functions[0].definition().parameters.get("status").unwrap();
        assert_eq!(
            argument.enum_values().unwrap(),
            ["ACTIVE".to_string(), "RETIRED".to_string()]
        );
        assert!(functions[0].query().query.contains("$status: Status!"));
    }

    #[test]
    fn test_idempotent_conversion() {
        let sdl = "type Query { character(id: ID!): Character }\n\
                   type Character { id: ID! name: String }";
        let first = convert(sdl);
        let second = convert(sdl);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.definition(), b.definition());
            assert_eq!(a.query(), b.query());
        }
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let error = SchemaConverter::parse("type Query {").unwrap_err();
        assert!(matches!(error, ConvertError::Syntax(_)));
    }
}
