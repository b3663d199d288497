//! Program queries

use async_graphql::{Context, Object, Result, ID};

use crate::error::to_graphql_error;
use crate::graphql::types::{
    list_args, parse_id, FilterInput, PaginationInput, Program, ProgramSortInput,
};
use crate::repositories::Repositories;

/// Program queries
#[derive(Default)]
pub struct ProgramQuery;

#[Object]
impl ProgramQuery {
    /// List active programs, newest first unless sorted otherwise
    #[graphql(name = "GetAllPrograms")]
    async fn get_all_programs(
        &self,
        ctx: &Context<'_>,
        filter: Option<FilterInput>,
        sort: Option<ProgramSortInput>,
        pagination: Option<PaginationInput>,
    ) -> Result<Vec<Program>> {
        let repo = ctx.data::<Repositories>()?.programs();
        let args = list_args(filter, sort.map(ProgramSortInput::into_pairs), pagination);
        let programs = repo.find_all(&args).await.map_err(to_graphql_error)?;
        Ok(programs.into_iter().map(Program::from).collect())
    }

    /// Get one active program by id
    #[graphql(name = "GetOneProgram")]
    async fn get_one_program(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
    ) -> Result<Program> {
        let repo = ctx.data::<Repositories>()?.programs();
        let id = parse_id(&id).map_err(to_graphql_error)?;
        let program = repo.find_active(id).await.map_err(to_graphql_error)?;
        Ok(Program::from(program))
    }
}
