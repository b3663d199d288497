//! Program mutations
//!
//! Every write checks the referenced rows are active. Programs start
//! unpublished and are toggled with `PublishProgram`/`UnpublishProgram`.

use async_graphql::{Context, InputObject, Object, Result, ID};

use crate::error::{to_graphql_error, ApiError, ApiResult};
use crate::graphql::types::{parse_id, Program};
use crate::models::PublishStatus;
use crate::repositories::{ProgramReferences, Repositories};

/// Writable program fields
#[derive(Debug, Clone, Default, InputObject)]
pub struct ProgramInput {
    pub name: Option<String>,
    #[graphql(name = "speciality_id")]
    pub speciality_id: Option<ID>,
    #[graphql(name = "sector_id")]
    pub sector_id: Option<ID>,
    #[graphql(name = "level_id")]
    pub level_id: Option<ID>,
    #[graphql(name = "campus_id")]
    pub campus_id: Option<ID>,
    #[graphql(name = "school_id")]
    pub school_id: Option<ID>,
    #[graphql(name = "scholar_season_id")]
    pub scholar_season_id: Option<ID>,
}

impl ProgramInput {
    fn references(&self) -> ApiResult<ProgramReferences> {
        let parse = |id: &Option<ID>| id.as_ref().map(parse_id).transpose();
        Ok(ProgramReferences {
            speciality_id: parse(&self.speciality_id)?,
            sector_id: parse(&self.sector_id)?,
            level_id: parse(&self.level_id)?,
            campus_id: parse(&self.campus_id)?,
            school_id: parse(&self.school_id)?,
            scholar_season_id: parse(&self.scholar_season_id)?,
        })
    }
}

/// Program mutations
#[derive(Default)]
pub struct ProgramMutation;

#[Object]
impl ProgramMutation {
    /// Create an unpublished program
    #[graphql(name = "CreateProgram")]
    async fn create_program(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "program_input")] input: ProgramInput,
    ) -> Result<Program> {
        let repo = ctx.data::<Repositories>()?.programs();
        let references = input.references().map_err(to_graphql_error)?;
        let name = input
            .name
            .ok_or(ApiError::MissingField("name"))
            .map_err(to_graphql_error)?;
        let program = repo
            .create(&name, &references)
            .await
            .map_err(to_graphql_error)?;
        Ok(Program::from(program))
    }

    /// Update the supplied fields of an active program
    #[graphql(name = "UpdateProgram")]
    async fn update_program(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
        #[graphql(name = "program_input")] input: ProgramInput,
    ) -> Result<Program> {
        let repo = ctx.data::<Repositories>()?.programs();
        let id = parse_id(&id).map_err(to_graphql_error)?;
        let references = input.references().map_err(to_graphql_error)?;
        let program = repo
            .update(id, input.name.as_deref(), &references)
            .await
            .map_err(to_graphql_error)?;
        Ok(Program::from(program))
    }

    /// Soft-delete an active program
    #[graphql(name = "DeleteProgram")]
    async fn delete_program(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
    ) -> Result<Program> {
        let repo = ctx.data::<Repositories>()?.programs();
        let id = parse_id(&id).map_err(to_graphql_error)?;
        let program = repo.soft_delete(id).await.map_err(to_graphql_error)?;
        Ok(Program::from(program))
    }

    /// Make an active program visible to students
    #[graphql(name = "PublishProgram")]
    async fn publish_program(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
    ) -> Result<Program> {
        set_publish_status(ctx, &id, PublishStatus::Published).await
    }

    /// Hide an active program from students
    #[graphql(name = "UnpublishProgram")]
    async fn unpublish_program(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
    ) -> Result<Program> {
        set_publish_status(ctx, &id, PublishStatus::NotPublished).await
    }
}

async fn set_publish_status(ctx: &Context<'_>, id: &ID, status: PublishStatus) -> Result<Program> {
    let repo = ctx.data::<Repositories>()?.programs();
    let id = parse_id(id).map_err(to_graphql_error)?;
    let program = repo
        .set_publish_status(id, status)
        .await
        .map_err(to_graphql_error)?;
    Ok(Program::from(program))
}
