//! Persistence seam between the query core and the document store
//!
//! Repositories and loaders only talk to a [`DocumentStore`]. Predicates
//! travel as a typed [`Pipeline`] (rendered to stage documents by the
//! MongoDB adapter, evaluated directly by the in-memory one) and rows as
//! BSON documents.

use async_trait::async_trait;
use bson::{oid::ObjectId, Document};

use crate::error::ApiResult;
use crate::models::EntityKind;
use crate::pipeline::Pipeline;

/// Operations the API needs from the document store
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Run a list pipeline against the entity's collection
    async fn aggregate(&self, kind: EntityKind, pipeline: &Pipeline) -> ApiResult<Vec<Document>>;

    /// Fetch a single document by id, whatever its status
    async fn find_by_id(&self, kind: EntityKind, id: ObjectId) -> ApiResult<Option<Document>>;

    /// Fetch every document whose id is in `ids`, in no particular order
    async fn find_by_ids(&self, kind: EntityKind, ids: &[ObjectId]) -> ApiResult<Vec<Document>>;

    /// Fetch a document whose name equals `name` ignoring case and accents
    async fn find_by_name(&self, kind: EntityKind, name: &str) -> ApiResult<Option<Document>>;

    /// Insert a document and return its generated id
    async fn insert(&self, kind: EntityKind, document: Document) -> ApiResult<ObjectId>;

    /// Set top-level fields on a document and return it after the update
    async fn update_by_id(
        &self,
        kind: EntityKind,
        id: ObjectId,
        changes: Document,
    ) -> ApiResult<Option<Document>>;

    /// Check the store is reachable
    async fn ping(&self) -> ApiResult<()>;

    /// Create the indexes the API relies on (idempotent)
    async fn ensure_indexes(&self) -> ApiResult<()>;
}
