//! Program GraphQL type
//!
//! Relation fields resolve through the request's loaders so a list of
//! programs issues one fetch per related entity.

use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::graphql::loaders::Loaders;
use crate::models::{EntityKind, NamedRecord, ProgramRecord};

use super::enums::{PublishStatus, Status};
use super::named::{Campus, Level, ScholarSeason, School, Sector, Speciality};

/// Program of study
#[derive(Debug, Clone)]
pub struct Program {
    inner: ProgramRecord,
}

impl From<ProgramRecord> for Program {
    fn from(record: ProgramRecord) -> Self {
        Self { inner: record }
    }
}

impl Program {
    async fn related(
        &self,
        ctx: &Context<'_>,
        kind: EntityKind,
        id: Option<ObjectId>,
    ) -> Result<Option<NamedRecord>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let loaders = ctx.data::<Loaders>()?;
        loaders
            .load_one(kind, id)
            .await
            .map_err(|e| e.as_ref().extend())
    }
}

fn hex(id: Option<ObjectId>) -> Option<ID> {
    id.map(|id| ID(id.to_hex()))
}

/// Program of study
#[Object]
impl Program {
    /// Unique identifier
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.inner.id.to_hex())
    }

    /// Display name
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Lifecycle status
    async fn status(&self) -> Status {
        self.inner.status.into()
    }

    /// Whether students can see the program
    #[graphql(name = "publish_status")]
    async fn publish_status(&self) -> PublishStatus {
        self.inner.publish_status.into()
    }

    #[graphql(name = "speciality_id")]
    async fn speciality_id(&self) -> Option<ID> {
        hex(self.inner.speciality_id)
    }

    #[graphql(name = "sector_id")]
    async fn sector_id(&self) -> Option<ID> {
        hex(self.inner.sector_id)
    }

    #[graphql(name = "level_id")]
    async fn level_id(&self) -> Option<ID> {
        hex(self.inner.level_id)
    }

    #[graphql(name = "campus_id")]
    async fn campus_id(&self) -> Option<ID> {
        hex(self.inner.campus_id)
    }

    #[graphql(name = "school_id")]
    async fn school_id(&self) -> Option<ID> {
        hex(self.inner.school_id)
    }

    #[graphql(name = "scholar_season_id")]
    async fn scholar_season_id(&self) -> Option<ID> {
        hex(self.inner.scholar_season_id)
    }

    /// Creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Last update timestamp
    async fn updated_at(&self) -> DateTime<Utc> {
        self.inner.updated_at
    }

    /// Total rows matching the list filter, set on paginated lists
    #[graphql(name = "count_document")]
    async fn count_document(&self) -> Option<i64> {
        self.inner.count_document
    }

    // Relationship resolvers

    async fn speciality(&self, ctx: &Context<'_>) -> Result<Option<Speciality>> {
        let row = self
            .related(ctx, EntityKind::Speciality, self.inner.speciality_id)
            .await?;
        Ok(row.map(Speciality::from))
    }

    async fn sector(&self, ctx: &Context<'_>) -> Result<Option<Sector>> {
        let row = self
            .related(ctx, EntityKind::Sector, self.inner.sector_id)
            .await?;
        Ok(row.map(Sector::from))
    }

    async fn level(&self, ctx: &Context<'_>) -> Result<Option<Level>> {
        let row = self
            .related(ctx, EntityKind::Level, self.inner.level_id)
            .await?;
        Ok(row.map(Level::from))
    }

    async fn campus(&self, ctx: &Context<'_>) -> Result<Option<Campus>> {
        let row = self
            .related(ctx, EntityKind::Campus, self.inner.campus_id)
            .await?;
        Ok(row.map(Campus::from))
    }

    async fn school(&self, ctx: &Context<'_>) -> Result<Option<School>> {
        let row = self
            .related(ctx, EntityKind::School, self.inner.school_id)
            .await?;
        Ok(row.map(School::from))
    }

    #[graphql(name = "scholar_season")]
    async fn scholar_season(&self, ctx: &Context<'_>) -> Result<Option<ScholarSeason>> {
        let row = self
            .related(ctx, EntityKind::ScholarSeason, self.inner.scholar_season_id)
            .await?;
        Ok(row.map(ScholarSeason::from))
    }
}
