//! GraphQL schema and resolvers for the Academia API
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers listing and fetching each entity
//! - Mutation resolvers creating, updating and soft-deleting them
//! - Type definitions for all GraphQL objects
//! - Request-scoped batch loaders for program relations

pub mod loaders;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use loaders::Loaders;
pub use schema::{build_schema, AcademiaSchema};
