//! Test helper functions for API integration tests
//!
//! Provides a GraphQL harness that executes requests the way the HTTP
//! handler does, with fresh loaders per request.

#![allow(dead_code)]

use std::sync::Arc;

use academia_api::graphql::{build_schema, AcademiaSchema, Loaders};
use academia_api::repositories::{DocumentStore, MemoryStore, Repositories};
use async_graphql::{Request, Response};
use serde_json::Value;

/// Schema backed by an in-memory store
pub struct TestApi {
    pub schema: AcademiaSchema,
    pub store: Arc<MemoryStore>,
}

impl TestApi {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let schema = build_schema(Repositories::new(store.clone()));
        Self { schema, store }
    }

    /// Execute a request with request-scoped loaders
    pub async fn execute(&self, query: &str) -> Response {
        let store: Arc<dyn DocumentStore> = self.store.clone();
        self.schema
            .execute(Request::new(query).data(Loaders::new(store)))
            .await
    }

    /// Execute a request that must succeed and return its data as JSON
    pub async fn data(&self, query: &str) -> Value {
        let response = self.execute(query).await;
        assert!(
            response.errors.is_empty(),
            "unexpected errors for {}: {:?}",
            query,
            response.errors
        );
        response.data.into_json().unwrap()
    }

    /// Execute a request that must fail and return the first error
    pub async fn error(&self, query: &str) -> GraphQLFailure {
        let response = self.execute(query).await;
        let error = response
            .errors
            .first()
            .unwrap_or_else(|| panic!("expected an error for {}", query));

        let extension = |name: &str| {
            error
                .extensions
                .as_ref()
                .and_then(|extensions| extensions.get(name))
                .and_then(|value| match value {
                    async_graphql::Value::String(s) => Some(s.clone()),
                    _ => None,
                })
        };

        GraphQLFailure {
            message: error.message.clone(),
            code: extension("code").unwrap_or_default(),
            field: extension("field"),
            id: extension("id"),
        }
    }
}

impl Default for TestApi {
    fn default() -> Self {
        Self::new()
    }
}

/// First error of a failed request
#[derive(Debug, Clone)]
pub struct GraphQLFailure {
    pub message: String,
    pub code: String,
    pub field: Option<String>,
    pub id: Option<String>,
}
