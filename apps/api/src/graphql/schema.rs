//! GraphQL schema builder for the Academia API

use async_graphql::{EmptySubscription, Schema};

use crate::repositories::Repositories;

use super::mutation::Mutation;
use super::query::Query;

/// The Academia GraphQL schema type
pub type AcademiaSchema = Schema<Query, Mutation, EmptySubscription>;

/// Create the GraphQL schema over the given repositories
///
/// Request-scoped loaders are not part of the schema; each request adds
/// its own [`Loaders`](super::loaders::Loaders).
pub fn build_schema(repositories: Repositories) -> AcademiaSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(repositories)
        .finish()
}
