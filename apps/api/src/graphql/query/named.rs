//! Queries for the name-only academic entities
//!
//! Each entity gets `GetAll<Entities>` and `GetOne<Entity>`.

use async_graphql::{Context, Object, Result, ID};

use crate::error::to_graphql_error;
use crate::graphql::types::{
    list_args, parse_id, Campus, FilterInput, Level, PaginationInput, ScholarSeason, School,
    Sector, SortInput, Speciality,
};
use crate::models::{EntityKind, NamedRecord};
use crate::repositories::Repositories;

macro_rules! named_query {
    ($query:ident, $object:ident, $kind:expr, $get_all:tt, $get_one:tt) => {
        #[derive(Default)]
        pub struct $query;

        #[Object]
        impl $query {
            /// List active rows, newest first unless sorted otherwise
            #[graphql(name = $get_all)]
            async fn get_all(
                &self,
                ctx: &Context<'_>,
                filter: Option<FilterInput>,
                sort: Option<SortInput>,
                pagination: Option<PaginationInput>,
            ) -> Result<Vec<$object>> {
                let repo = ctx.data::<Repositories>()?.entity($kind);
                let args = list_args(filter, sort.map(SortInput::into_pairs), pagination);
                let rows: Vec<NamedRecord> =
                    repo.find_all(&args).await.map_err(to_graphql_error)?;
                Ok(rows.into_iter().map($object::from).collect())
            }

            /// Get one active row by id
            #[graphql(name = $get_one)]
            async fn get_one(
                &self,
                ctx: &Context<'_>,
                #[graphql(name = "_id")] id: ID,
            ) -> Result<$object> {
                let repo = ctx.data::<Repositories>()?.entity($kind);
                let id = parse_id(&id).map_err(to_graphql_error)?;
                let row: NamedRecord = repo.find_active(id).await.map_err(to_graphql_error)?;
                Ok($object::from(row))
            }
        }
    };
}

named_query!(
    SpecialityQuery,
    Speciality,
    EntityKind::Speciality,
    "GetAllSpecialities",
    "GetOneSpeciality"
);
named_query!(
    SectorQuery,
    Sector,
    EntityKind::Sector,
    "GetAllSectors",
    "GetOneSector"
);
named_query!(
    LevelQuery,
    Level,
    EntityKind::Level,
    "GetAllLevels",
    "GetOneLevel"
);
named_query!(
    CampusQuery,
    Campus,
    EntityKind::Campus,
    "GetAllCampuses",
    "GetOneCampus"
);
named_query!(
    SchoolQuery,
    School,
    EntityKind::School,
    "GetAllSchools",
    "GetOneSchool"
);
named_query!(
    ScholarSeasonQuery,
    ScholarSeason,
    EntityKind::ScholarSeason,
    "GetAllScholarSeasons",
    "GetOneScholarSeason"
);
