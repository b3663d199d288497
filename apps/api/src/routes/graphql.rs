//! GraphQL HTTP route handlers
//!
//! - `POST /graphql` - Execute a GraphQL request
//! - `GET /graphql/playground` - Interactive playground

use std::sync::Arc;

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};

use crate::graphql::{AcademiaSchema, Loaders};
use crate::repositories::DocumentStore;

/// Shared state for the GraphQL handlers
#[derive(Clone)]
pub struct GraphQLState {
    pub schema: AcademiaSchema,
    pub store: Arc<dyn DocumentStore>,
}

impl GraphQLState {
    pub fn new(schema: AcademiaSchema, store: Arc<dyn DocumentStore>) -> Self {
        Self { schema, store }
    }
}

/// Create GraphQL router
pub fn graphql_router(state: GraphQLState) -> Router {
    Router::new()
        .route("/", post(graphql_handler))
        .route("/playground", get(graphql_playground))
        .with_state(state)
}

/// GraphQL request handler
///
/// Every request gets fresh loaders so batching and caching never span
/// requests.
async fn graphql_handler(
    State(state): State<GraphQLState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req.into_inner().data(Loaders::new(state.store.clone()));
    state.schema.execute(request).await.into()
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
