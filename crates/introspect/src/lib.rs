//! Remote-schema entry points: fetch a GraphQL schema over introspection and
//! convert it into an LLM function catalog bound to a live HTTP executor.
//!
//! # Examples
//!
//! ```no_run
//! use toolgen_convert::ConverterConfig;
//! use toolgen_introspect::convert_endpoint;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let functions = convert_endpoint(
//!         "https://api.example.com/graphql",
//!         ConverterConfig::default(),
//!     )
//!     .await?;
//!     for function in &functions {
//!         println!("{}", function.name());
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod executor;
mod query;
mod sdl;
mod types;

pub use client::IntrospectionClient;
pub use error::{IntrospectError, Result};
pub use executor::HttpQueryExecutor;
pub use query::INTROSPECTION_QUERY;
pub use sdl::introspection_to_sdl;
pub use types::*;

use std::sync::Arc;
use toolgen_catalog::{ApiFunction, ApiQuery, QueryExecutor};
use toolgen_convert::ConverterConfig;

/// Fetches a schema from `url` and renders it as SDL text.
pub async fn introspect_to_sdl(url: &str) -> Result<String> {
    let response = IntrospectionClient::new().execute(url).await?;
    Ok(introspection_to_sdl(&response.data.schema))
}

/// Fetches a schema from `url` and converts it into a catalog whose
/// functions execute against that same endpoint.
pub async fn convert_endpoint(url: &str, config: ConverterConfig) -> Result<Vec<ApiFunction>> {
    convert_with_client(url, &IntrospectionClient::new(), config).await
}

/// Like [`convert_endpoint`], with a pre-configured client; the client's
/// headers carry over to the executor the catalog is bound to.
pub async fn convert_with_client(
    url: &str,
    client: &IntrospectionClient,
    config: ConverterConfig,
) -> Result<Vec<ApiFunction>> {
    let response = client.execute(url).await?;
    let sdl = introspection_to_sdl(&response.data.schema);
    let executor = Arc::new(HttpQueryExecutor::with_headers(url, client.headers().clone())?);
    Ok(toolgen_convert::convert_schema_with_executor(&sdl, config, executor)?)
}

/// Converts whatever schema `executor` serves into a catalog bound to it.
///
/// The introspection query itself is sent through the executor, so any
/// transport it implements works, not just plain HTTP.
pub async fn convert_via_executor(
    executor: Arc<dyn QueryExecutor>,
    config: ConverterConfig,
) -> Result<Vec<ApiFunction>> {
    let raw = executor
        .execute_query(&ApiQuery::new(INTROSPECTION_QUERY), None)
        .await?;
    let data: IntrospectionData =
        serde_json::from_str(&raw).map_err(|e| IntrospectError::Parse(e.to_string()))?;
    let sdl = introspection_to_sdl(&data.schema);
    Ok(toolgen_convert::convert_schema_with_executor(&sdl, config, executor)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use toolgen_catalog::{
        validate_arguments, ExecutorError, FunctionDefinition, JsonMap, ValidationResult,
    };

    /// Serves a canned introspection payload; real queries echo back "{}".
    struct CannedSchemaExecutor {
        introspection: String,
    }

    #[async_trait]
    impl QueryExecutor for CannedSchemaExecutor {
        fn validate(
            &self,
            function: &FunctionDefinition,
            arguments: Option<&JsonMap>,
        ) -> ValidationResult {
            match arguments {
                Some(arguments) => validate_arguments(function, arguments),
                None => ValidationResult::Valid,
            }
        }

        async fn execute_query(
            &self,
            query: &ApiQuery,
            _variables: Option<&JsonMap>,
        ) -> std::result::Result<String, ExecutorError> {
            if query.query.contains("__schema") {
                Ok(self.introspection.clone())
            } else {
                Ok("{}".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_convert_via_executor_round_trip() {
        let introspection = serde_json::json!({
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": null,
                "subscriptionType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "description": null,
                        "fields": [
                            {
                                "name": "version",
                                "description": "Current version",
                                "args": [],
                                "type": { "kind": "SCALAR", "name": "String", "ofType": null }
                            }
                        ],
                        "interfaces": []
                    }
                ]
            }
        });
        let executor = Arc::new(CannedSchemaExecutor {
            introspection: introspection.to_string(),
        });
        let functions = convert_via_executor(executor, ConverterConfig::default())
            .await
            .unwrap();
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name(), "version");
        assert_eq!(
            functions[0].definition().description.as_deref(),
            Some("Current version")
        );
        assert_eq!(functions[0].execute(None).await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_convert_via_executor_rejects_bad_payload() {
        let executor = Arc::new(CannedSchemaExecutor {
            introspection: "not json".to_string(),
        });
        let error = convert_via_executor(executor, ConverterConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(error, IntrospectError::Parse(_)));
    }
}
