//! Program repository
//!
//! Programs follow the generic entity behavior and additionally carry
//! references to six other entities, each of which must point at an
//! active row whenever a program is written.

use std::sync::Arc;

use bson::{oid::ObjectId, Document};

use super::entity::EntityRepository;
use super::store::DocumentStore;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    EntityKind, ProgramRecord, ProgramReference, PublishStatus, PROGRAM_REFERENCES,
};
use crate::pipeline::ListArgs;

/// Reference values supplied on a program write, keyed by stored field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramReferences {
    pub speciality_id: Option<ObjectId>,
    pub sector_id: Option<ObjectId>,
    pub level_id: Option<ObjectId>,
    pub campus_id: Option<ObjectId>,
    pub school_id: Option<ObjectId>,
    pub scholar_season_id: Option<ObjectId>,
}

impl ProgramReferences {
    fn get(&self, reference: &ProgramReference) -> Option<ObjectId> {
        match reference.kind {
            EntityKind::Speciality => self.speciality_id,
            EntityKind::Sector => self.sector_id,
            EntityKind::Level => self.level_id,
            EntityKind::Campus => self.campus_id,
            EntityKind::School => self.school_id,
            EntityKind::ScholarSeason => self.scholar_season_id,
            EntityKind::Program => None,
        }
    }

    /// Supplied references paired with their definition
    pub fn supplied(&self) -> impl Iterator<Item = (&'static ProgramReference, ObjectId)> + '_ {
        PROGRAM_REFERENCES
            .iter()
            .filter_map(|reference| self.get(reference).map(|id| (reference, id)))
    }

    /// Supplied references as document fields
    pub fn to_document(&self) -> Document {
        self.supplied()
            .map(|(reference, id)| (reference.field.to_string(), id.into()))
            .collect()
    }
}

/// Repository for program database operations
#[derive(Clone)]
pub struct ProgramRepository {
    programs: EntityRepository,
    store: Arc<dyn DocumentStore>,
}

impl ProgramRepository {
    /// Create a new ProgramRepository instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            programs: EntityRepository::new(EntityKind::Program, store.clone()),
            store,
        }
    }

    /// List active programs
    pub async fn find_all(&self, args: &ListArgs) -> ApiResult<Vec<ProgramRecord>> {
        self.programs.find_all(args).await
    }

    /// Fetch an active program
    pub async fn find_active(&self, id: ObjectId) -> ApiResult<ProgramRecord> {
        self.programs.find_active(id).await
    }

    /// Create an unpublished program after checking its references
    pub async fn create(
        &self,
        name: &str,
        references: &ProgramReferences,
    ) -> ApiResult<ProgramRecord> {
        self.check_references(references).await?;

        let mut fields = references.to_document();
        fields.insert("publish_status", PublishStatus::NotPublished.as_str());
        self.programs.create(name, fields).await
    }

    /// Replace the supplied fields of an active program
    pub async fn update(
        &self,
        id: ObjectId,
        name: Option<&str>,
        references: &ProgramReferences,
    ) -> ApiResult<ProgramRecord> {
        self.programs.find_active::<ProgramRecord>(id).await?;
        self.check_references(references).await?;
        self.programs
            .update(id, name, references.to_document())
            .await
    }

    /// Soft-delete an active program
    pub async fn soft_delete(&self, id: ObjectId) -> ApiResult<ProgramRecord> {
        self.programs.soft_delete(id).await
    }

    /// Change the publication state of an active program
    pub async fn set_publish_status(
        &self,
        id: ObjectId,
        status: PublishStatus,
    ) -> ApiResult<ProgramRecord> {
        let program = self
            .programs
            .set_field(id, "publish_status", status.as_str())
            .await?;
        tracing::info!(id = %id, status = status.as_str(), "Changed program publish status");
        Ok(program)
    }

    /// Every supplied reference must name an active row of the right entity
    async fn check_references(&self, references: &ProgramReferences) -> ApiResult<()> {
        for (reference, id) in references.supplied() {
            let target = EntityRepository::new(reference.kind, self.store.clone());
            if !target.is_active(id).await? {
                tracing::debug!(field = reference.field, id = %id, "Rejected program reference");
                return Err(ApiError::ReferenceNotFound {
                    field: reference.field,
                    id: id.to_hex(),
                });
            }
        }
        Ok(())
    }
}
