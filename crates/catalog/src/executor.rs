//! The query executor boundary.
//!
//! Converters produce catalog entries; something else has to run them. The
//! [`QueryExecutor`] trait is that collaborator's contract: validate a set of
//! call arguments against a function's parameter schema, and execute a query
//! template with variables against a live API. The converter core only
//! guarantees its side of the bargain — a syntactically valid, fully
//! variable-declared query and a parameter schema sufficient for pre-call
//! validation.

use crate::definition::{ApiQuery, FunctionDefinition, JsonType};
use async_trait::async_trait;
use thiserror::Error;

/// JSON object used for call arguments and query variables.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Why a set of call arguments was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The named function does not exist in the catalog.
    NotFound,
    /// The arguments were not a well-formed JSON object.
    MalformedInput,
    /// An argument was missing, unknown, or of the wrong type.
    InvalidArgument,
}

impl ValidationErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationErrorKind::NotFound => "not found",
            ValidationErrorKind::MalformedInput => "malformed input",
            ValidationErrorKind::InvalidArgument => "invalid argument",
        }
    }
}

/// Outcome of validating call arguments against a function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid {
        kind: ValidationErrorKind,
        message: String,
    },
}

impl ValidationResult {
    #[must_use]
    pub fn invalid(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        ValidationResult::Invalid {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid { message, .. } => Some(message),
        }
    }
}

/// Transport-level failure while executing a query.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("failed to parse API response: {0}")]
    Response(String),
}

/// Executes catalog queries against an API and validates call arguments.
///
/// Implementations own all wire concerns (authentication, timeouts, retry).
/// `execute_query` returns the serialized JSON result of the query.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Validates that `arguments` are acceptable for `function`.
    ///
    /// `None` arguments means "validate the definition itself" — executors
    /// that cannot do better may simply return [`ValidationResult::Valid`].
    fn validate(&self, function: &FunctionDefinition, arguments: Option<&JsonMap>)
        -> ValidationResult;

    /// Executes the query with the given variables, returning serialized JSON.
    async fn execute_query(
        &self,
        query: &ApiQuery,
        variables: Option<&JsonMap>,
    ) -> Result<String, ExecutorError>;
}

/// Executor that accepts every definition and returns `"void"` on execution.
///
/// Useful as the default while building catalogs offline and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidQueryExecutor;

impl VoidQueryExecutor {
    const EXECUTION_RESULT: &'static str = "void";
}

#[async_trait]
impl QueryExecutor for VoidQueryExecutor {
    fn validate(
        &self,
        _function: &FunctionDefinition,
        _arguments: Option<&JsonMap>,
    ) -> ValidationResult {
        ValidationResult::Valid
    }

    async fn execute_query(
        &self,
        _query: &ApiQuery,
        _variables: Option<&JsonMap>,
    ) -> Result<String, ExecutorError> {
        Ok(Self::EXECUTION_RESULT.to_string())
    }
}

/// Checks call arguments against a function's parameter schema.
///
/// This is the structural check executors use before sending a query:
/// every required parameter must be present, every provided argument must be
/// declared, and primitive types must line up with the declared
/// [`JsonType`]. Enum values are checked against the declared set.
#[must_use]
pub fn validate_arguments(function: &FunctionDefinition, arguments: &JsonMap) -> ValidationResult {
    let parameters = &function.parameters;

    for name in parameters.required() {
        if !arguments.contains_key(name) {
            return ValidationResult::invalid(
                ValidationErrorKind::InvalidArgument,
                format!("missing required argument '{name}'"),
            );
        }
    }

    for (name, value) in arguments {
        let Some(argument) = parameters.get(name) else {
            return ValidationResult::invalid(
                ValidationErrorKind::InvalidArgument,
                format!("unknown argument '{name}'"),
            );
        };
        if let Some(message) = type_mismatch(name, argument.json_type(), value) {
            return ValidationResult::invalid(ValidationErrorKind::InvalidArgument, message);
        }
        if let Some(allowed) = argument.enum_values() {
            let matches = value
                .as_str()
                .is_some_and(|v| allowed.iter().any(|a| a == v));
            if !matches {
                return ValidationResult::invalid(
                    ValidationErrorKind::InvalidArgument,
                    format!("argument '{name}' must be one of {allowed:?}"),
                );
            }
        }
    }

    ValidationResult::Valid
}

fn type_mismatch(name: &str, expected: JsonType, value: &serde_json::Value) -> Option<String> {
    let ok = match expected {
        JsonType::String => value.is_string(),
        JsonType::Number => value.is_number(),
        JsonType::Integer => value.is_i64() || value.is_u64(),
        JsonType::Boolean => value.is_boolean(),
        JsonType::Array => value.is_array(),
        JsonType::Object => value.is_object(),
    };
    (!ok).then(|| {
        format!(
            "argument '{name}' should be of type {}, got {value}",
            expected.as_str()
        )
    })
}
