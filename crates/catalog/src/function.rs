//! Catalog entries binding a function definition to its query and executor.

use crate::definition::{ApiQuery, FunctionDefinition};
use crate::executor::{ExecutorError, JsonMap, QueryExecutor, ValidationResult};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error raised when a catalog entry fails its construction-time validation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("function [{name}] rejected by executor: {message}")]
    InvalidFunction { name: String, message: String },
}

/// One entry of the generated function catalog.
///
/// Binds a [`FunctionDefinition`] to the [`ApiQuery`] that implements it and
/// the [`QueryExecutor`] that runs it. Construction validates the definition
/// against the executor, so a successfully built entry is always callable.
#[derive(Clone)]
pub struct ApiFunction {
    function: FunctionDefinition,
    query: ApiQuery,
    executor: Arc<dyn QueryExecutor>,
}

impl ApiFunction {
    /// Builds a catalog entry, validating the definition with the executor.
    pub fn new(
        function: FunctionDefinition,
        query: ApiQuery,
        executor: Arc<dyn QueryExecutor>,
    ) -> Result<Self, CatalogError> {
        match executor.validate(&function, None) {
            ValidationResult::Valid => Ok(Self {
                function,
                query,
                executor,
            }),
            ValidationResult::Invalid { message, .. } => Err(CatalogError::InvalidFunction {
                name: function.name,
                message,
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.function.name
    }

    #[must_use]
    pub fn definition(&self) -> &FunctionDefinition {
        &self.function
    }

    #[must_use]
    pub fn query(&self) -> &ApiQuery {
        &self.query
    }

    /// Validates call arguments without executing.
    #[must_use]
    pub fn validate(&self, arguments: Option<&JsonMap>) -> ValidationResult {
        self.executor.validate(&self.function, arguments)
    }

    /// Executes the bound query with the given variables.
    pub async fn execute(&self, arguments: Option<&JsonMap>) -> Result<String, ExecutorError> {
        self.executor.execute_query(&self.query, arguments).await
    }

    /// Validates, then executes; on validation failure returns a
    /// model-facing message asking for a corrected call instead of an error.
    pub async fn validate_and_execute(
        &self,
        arguments: Option<&JsonMap>,
    ) -> Result<String, ExecutorError> {
        match self.validate(arguments) {
            ValidationResult::Valid => self.execute(arguments).await,
            ValidationResult::Invalid { message, .. } => {
                Ok(Self::invalid_call_message(self.name(), &message))
            }
        }
    }

    /// Like [`validate_and_execute`](Self::validate_and_execute), but takes
    /// the raw JSON argument string a model produced. Malformed JSON yields
    /// the same model-facing retry message.
    pub async fn validate_and_execute_json(
        &self,
        arguments_json: &str,
    ) -> Result<String, ExecutorError> {
        match serde_json::from_str::<JsonMap>(arguments_json) {
            Ok(arguments) => self.validate_and_execute(Some(&arguments)).await,
            Err(error) => Ok(Self::invalid_call_message(
                self.name(),
                &format!("malformed JSON: {error}"),
            )),
        }
    }

    fn invalid_call_message(function_name: &str, error_message: &str) -> String {
        format!(
            "It looks like you tried to call function `{function_name}`, \
             but this has failed with the following error: {error_message}. \
             Please retry to call the function again. Send ONLY the JSON as a response."
        )
    }
}

impl fmt::Debug for ApiFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiFunction")
            .field("function", &self.function)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl Serialize for ApiFunction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiFunction", 2)?;
        state.serialize_field("function", &self.function)?;
        state.serialize_field("query", &self.query)?;
        state.end()
    }
}
