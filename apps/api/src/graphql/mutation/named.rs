//! Mutations for the name-only academic entities
//!
//! Each entity gets `Create<Entity>`, `Update<Entity>` and
//! `Delete<Entity>`. Deletion is soft: the row is kept with status
//! `deleted`.

use async_graphql::{Context, InputObject, Object, Result, ID};
use bson::Document;

use crate::error::{to_graphql_error, ApiError};
use crate::graphql::types::{parse_id, Campus, Level, ScholarSeason, School, Sector, Speciality};
use crate::models::{EntityKind, NamedRecord};
use crate::repositories::Repositories;

macro_rules! named_mutation {
    (
        $mutation:ident, $input:ident, $object:ident, $kind:expr,
        $input_arg:tt, $create:tt, $update:tt, $delete:tt
    ) => {
        /// Writable fields
        #[derive(Debug, Clone, Default, InputObject)]
        pub struct $input {
            pub name: Option<String>,
        }

        #[derive(Default)]
        pub struct $mutation;

        #[Object]
        impl $mutation {
            /// Create an active row
            #[graphql(name = $create)]
            async fn create(
                &self,
                ctx: &Context<'_>,
                #[graphql(name = $input_arg)] input: $input,
            ) -> Result<$object> {
                let repo = ctx.data::<Repositories>()?.entity($kind);
                let name = input
                    .name
                    .ok_or(ApiError::MissingField("name"))
                    .map_err(to_graphql_error)?;
                let row: NamedRecord = repo
                    .create(&name, Document::new())
                    .await
                    .map_err(to_graphql_error)?;
                Ok($object::from(row))
            }

            /// Update the supplied fields of an active row
            #[graphql(name = $update)]
            async fn update(
                &self,
                ctx: &Context<'_>,
                #[graphql(name = "_id")] id: ID,
                #[graphql(name = $input_arg)] input: $input,
            ) -> Result<$object> {
                let repo = ctx.data::<Repositories>()?.entity($kind);
                let id = parse_id(&id).map_err(to_graphql_error)?;
                let row: NamedRecord = repo
                    .update(id, input.name.as_deref(), Document::new())
                    .await
                    .map_err(to_graphql_error)?;
                Ok($object::from(row))
            }

            /// Soft-delete an active row
            #[graphql(name = $delete)]
            async fn delete(
                &self,
                ctx: &Context<'_>,
                #[graphql(name = "_id")] id: ID,
            ) -> Result<$object> {
                let repo = ctx.data::<Repositories>()?.entity($kind);
                let id = parse_id(&id).map_err(to_graphql_error)?;
                let row: NamedRecord = repo.soft_delete(id).await.map_err(to_graphql_error)?;
                Ok($object::from(row))
            }
        }
    };
}

named_mutation!(
    SpecialityMutation,
    SpecialityInput,
    Speciality,
    EntityKind::Speciality,
    "speciality_input",
    "CreateSpeciality",
    "UpdateSpeciality",
    "DeleteSpeciality"
);
named_mutation!(
    SectorMutation,
    SectorInput,
    Sector,
    EntityKind::Sector,
    "sector_input",
    "CreateSector",
    "UpdateSector",
    "DeleteSector"
);
named_mutation!(
    LevelMutation,
    LevelInput,
    Level,
    EntityKind::Level,
    "level_input",
    "CreateLevel",
    "UpdateLevel",
    "DeleteLevel"
);
named_mutation!(
    CampusMutation,
    CampusInput,
    Campus,
    EntityKind::Campus,
    "campus_input",
    "CreateCampus",
    "UpdateCampus",
    "DeleteCampus"
);
named_mutation!(
    SchoolMutation,
    SchoolInput,
    School,
    EntityKind::School,
    "school_input",
    "CreateSchool",
    "UpdateSchool",
    "DeleteSchool"
);
named_mutation!(
    ScholarSeasonMutation,
    ScholarSeasonInput,
    ScholarSeason,
    EntityKind::ScholarSeason,
    "scholar_season_input",
    "CreateScholarSeason",
    "UpdateScholarSeason",
    "DeleteScholarSeason"
);
