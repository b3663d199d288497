//! GraphQL queries for the Academia API
//!
//! This module contains all query resolvers, one object per entity.

mod named;
mod program;

pub use named::{
    CampusQuery, LevelQuery, ScholarSeasonQuery, SchoolQuery, SectorQuery, SpecialityQuery,
};
pub use program::ProgramQuery;

use async_graphql::MergedObject;

/// Root query type combining all entity queries
#[derive(MergedObject, Default)]
pub struct Query(
    SpecialityQuery,
    SectorQuery,
    LevelQuery,
    CampusQuery,
    SchoolQuery,
    ScholarSeasonQuery,
    ProgramQuery,
);
