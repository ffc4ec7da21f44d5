//! HTTP-backed query executor for catalog functions.

use crate::error::{IntrospectError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use toolgen_catalog::{
    validate_arguments, ApiQuery, ExecutorError, FunctionDefinition, JsonMap, QueryExecutor,
    ValidationResult,
};

/// Executes catalog queries against a GraphQL endpoint over HTTP.
///
/// Queries are POSTed as `{"query": ..., "variables": ...}`; the response's
/// `data` payload is returned as a JSON string, and GraphQL-level errors are
/// surfaced as execution failures. Validation checks arguments against the
/// function's parameter schema before anything is sent.
pub struct HttpQueryExecutor {
    endpoint: String,
    headers: HashMap<String, String>,
    client: reqwest::Client,
}

impl HttpQueryExecutor {
    /// Creates an executor for `endpoint` with default timeouts.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_headers(endpoint, HashMap::new())
    }

    /// Creates an executor that sends `headers` with every request.
    pub fn with_headers(
        endpoint: impl Into<String>,
        headers: HashMap<String, String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| IntrospectError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            headers,
            client,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for HttpQueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpQueryExecutor")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl QueryExecutor for HttpQueryExecutor {
    fn validate(&self, function: &FunctionDefinition, arguments: Option<&JsonMap>) -> ValidationResult {
        match arguments {
            Some(arguments) => validate_arguments(function, arguments),
            None => ValidationResult::Valid,
        }
    }

    #[tracing::instrument(skip(self, query, variables))]
    async fn execute_query(
        &self,
        query: &ApiQuery,
        variables: Option<&JsonMap>,
    ) -> std::result::Result<String, ExecutorError> {
        let body = serde_json::json!({
            "query": query.query,
            "variables": variables,
        });

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json");
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| ExecutorError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ExecutorError::Http(status.as_u16(), error_body));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ExecutorError::Response(e.to_string()))?;

        if let Some(errors) = payload.get("errors") {
            if errors.as_array().is_some_and(|list| !list.is_empty()) {
                return Err(ExecutorError::Response(errors.to_string()));
            }
        }

        let data = payload.get("data").cloned().unwrap_or(Value::Null);
        Ok(data.to_string())
    }
}
