//! GraphQL mutations for the Academia API
//!
//! This module contains all mutation resolvers, one object per entity.

mod named;
mod program;

pub use named::{
    CampusInput, CampusMutation, LevelInput, LevelMutation, ScholarSeasonInput,
    ScholarSeasonMutation, SchoolInput, SchoolMutation, SectorInput, SectorMutation,
    SpecialityInput, SpecialityMutation,
};
pub use program::{ProgramInput, ProgramMutation};

use async_graphql::MergedObject;

/// Root mutation type combining all entity mutations
#[derive(MergedObject, Default)]
pub struct Mutation(
    SpecialityMutation,
    SectorMutation,
    LevelMutation,
    CampusMutation,
    SchoolMutation,
    ScholarSeasonMutation,
    ProgramMutation,
);
