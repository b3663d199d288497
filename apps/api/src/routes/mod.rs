//! HTTP route handlers for the Academia API
//!
//! - GraphQL endpoint and playground
//! - Health check and readiness endpoints

pub mod graphql;
pub mod health;

pub use graphql::{graphql_router, GraphQLState};
pub use health::{health_router, HealthState};

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::graphql::build_schema;
use crate::repositories::{DocumentStore, Repositories};

/// Build the full application router over a document store
pub fn app_router(store: Arc<dyn DocumentStore>) -> Router {
    let schema = build_schema(Repositories::new(store.clone()));

    Router::new()
        .route("/", axum::routing::get(root))
        // GraphQL endpoints: /graphql, /graphql/playground
        .nest("/graphql", graphql_router(GraphQLState::new(schema, store.clone())))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(HealthState::new(store)))
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    "Academia API"
}
