//! Generic entity repository
//!
//! Implements the list/get/create/update/soft-delete behavior shared by
//! every academic entity. Entity-specific differences come from
//! [`EntityKind`]; row types are any deserializable record.

use std::sync::Arc;

use bson::{doc, oid::ObjectId, Bson, Document};
use chrono::Utc;
use serde::de::DeserializeOwned;

use super::store::DocumentStore;
use crate::error::{ApiError, ApiResult};
use crate::models::{EntityKind, Status};
use crate::pipeline::{ListArgs, Pipeline};

/// Repository for one entity kind
#[derive(Clone)]
pub struct EntityRepository {
    kind: EntityKind,
    store: Arc<dyn DocumentStore>,
}

impl EntityRepository {
    /// Create a new EntityRepository instance
    pub fn new(kind: EntityKind, store: Arc<dyn DocumentStore>) -> Self {
        Self { kind, store }
    }

    /// Entity this repository manages
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// List active rows matching the filter, sorted and optionally paginated
    ///
    /// An empty result is reported as not found.
    pub async fn find_all<R: DeserializeOwned>(&self, args: &ListArgs) -> ApiResult<Vec<R>> {
        let pipeline = Pipeline::build(self.kind, args)?;
        let rows = self.store.aggregate(self.kind, &pipeline).await?;

        if rows.is_empty() {
            return Err(ApiError::not_found(self.kind.label(), "no matching rows"));
        }

        rows.into_iter()
            .map(|row| bson::from_document(row).map_err(ApiError::from))
            .collect()
    }

    /// Fetch a row that exists and is not deleted
    pub async fn find_active<R: DeserializeOwned>(&self, id: ObjectId) -> ApiResult<R> {
        let row = self.find_active_document(id).await?;
        Ok(bson::from_document(row)?)
    }

    /// Insert a new active row
    ///
    /// `fields` holds the entity's own fields; status and timestamps are
    /// added here.
    pub async fn create<R: DeserializeOwned>(&self, name: &str, fields: Document) -> ApiResult<R> {
        let name = self.normalize_name(name)?;
        self.ensure_name_available(&name, None).await?;

        let now = bson::DateTime::from_chrono(Utc::now());
        let mut document = doc! {
            "name": name.as_str(),
            "status": Status::Active.as_str(),
        };
        for (field, value) in fields {
            document.insert(field, value);
        }
        document.insert("createdAt", now);
        document.insert("updatedAt", now);

        let id = self
            .store
            .insert(self.kind, document)
            .await
            .map_err(|e| self.map_duplicate(e, &name))?;
        tracing::info!(entity = self.kind.label(), id = %id, "Created row");

        let row = self
            .store
            .find_by_id(self.kind, id)
            .await?
            .ok_or_else(|| ApiError::Internal(format!("{} {} vanished after insert", self.kind, id)))?;
        Ok(bson::from_document(row)?)
    }

    /// Replace the supplied top-level fields of an active row
    pub async fn update<R: DeserializeOwned>(
        &self,
        id: ObjectId,
        name: Option<&str>,
        mut changes: Document,
    ) -> ApiResult<R> {
        self.find_active_document(id).await?;

        let name = match name {
            Some(name) => {
                let name = self.normalize_name(name)?;
                self.ensure_name_available(&name, Some(id)).await?;
                changes.insert("name", name.as_str());
                Some(name)
            }
            None => None,
        };

        let row = self
            .set_fields(id, changes)
            .await
            .map_err(|e| match &name {
                Some(name) => self.map_duplicate(e, name),
                None => e,
            })?;
        tracing::info!(entity = self.kind.label(), id = %id, "Updated row");
        Ok(bson::from_document(row)?)
    }

    /// Mark an active row as deleted and return it
    pub async fn soft_delete<R: DeserializeOwned>(&self, id: ObjectId) -> ApiResult<R> {
        self.find_active_document(id).await?;

        let row = self
            .set_fields(id, doc! { "status": Status::Deleted.as_str() })
            .await?;
        tracing::info!(entity = self.kind.label(), id = %id, "Soft-deleted row");
        Ok(bson::from_document(row)?)
    }

    /// Set a single field on an active row
    pub async fn set_field<R: DeserializeOwned>(
        &self,
        id: ObjectId,
        field: &str,
        value: impl Into<Bson>,
    ) -> ApiResult<R> {
        self.find_active_document(id).await?;

        let mut changes = Document::new();
        changes.insert(field, value.into());
        let row = self.set_fields(id, changes).await?;
        Ok(bson::from_document(row)?)
    }

    /// Whether `id` names an existing, non-deleted row
    pub async fn is_active(&self, id: ObjectId) -> ApiResult<bool> {
        Ok(self
            .store
            .find_by_id(self.kind, id)
            .await?
            .is_some_and(|row| is_active_document(&row)))
    }

    async fn find_active_document(&self, id: ObjectId) -> ApiResult<Document> {
        match self.store.find_by_id(self.kind, id).await? {
            Some(row) if is_active_document(&row) => Ok(row),
            _ => Err(ApiError::not_found(self.kind.label(), id.to_hex())),
        }
    }

    async fn set_fields(&self, id: ObjectId, mut changes: Document) -> ApiResult<Document> {
        changes.insert("updatedAt", bson::DateTime::from_chrono(Utc::now()));
        self.store
            .update_by_id(self.kind, id, changes)
            .await?
            .ok_or_else(|| ApiError::not_found(self.kind.label(), id.to_hex()))
    }

    fn normalize_name(&self, name: &str) -> ApiResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::MissingField("name"));
        }
        Ok(name.to_string())
    }

    /// Pre-check for a clashing name; the store's unique index stays authoritative
    async fn ensure_name_available(&self, name: &str, except: Option<ObjectId>) -> ApiResult<()> {
        if !self.kind.unique_name() {
            return Ok(());
        }

        let existing = self.store.find_by_name(self.kind, name).await?;
        let clash = existing.is_some_and(|row| row.get_object_id("_id").ok() != except);
        if clash {
            tracing::debug!(entity = self.kind.label(), name, "Rejected duplicate name");
            return Err(ApiError::duplicate_name(self.kind.label(), name));
        }
        Ok(())
    }

    fn map_duplicate(&self, error: ApiError, name: &str) -> ApiError {
        if error.is_duplicate_key() {
            ApiError::duplicate_name(self.kind.label(), name)
        } else {
            error
        }
    }
}

/// Same rule as the list `$match`: only an explicit `active` status counts
fn is_active_document(row: &Document) -> bool {
    row.get_str("status").ok() == Some(Status::Active.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NamedRecord;
    use crate::pipeline::{FilterArgs, PageArgs};
    use crate::repositories::MemoryStore;
    use assert_matches::assert_matches;

    fn repo(kind: EntityKind) -> EntityRepository {
        EntityRepository::new(kind, Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_sets_defaults() {
        let repo = repo(EntityKind::Level);
        let level: NamedRecord = repo.create("  Bachelor  ", Document::new()).await.unwrap();

        assert_eq!(level.name, "Bachelor");
        assert_eq!(level.status, Status::Active);
        assert_eq!(level.created_at, level.updated_at);
        assert_eq!(level.count_document, None);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let repo = repo(EntityKind::Sector);
        let result = repo.create::<NamedRecord>("   ", Document::new()).await;
        assert_matches!(result, Err(ApiError::MissingField("name")));
    }

    #[tokio::test]
    async fn test_duplicate_name_checked_against_deleted_rows() {
        let repo = repo(EntityKind::Speciality);
        let first: NamedRecord = repo.create("Engineering", Document::new()).await.unwrap();
        repo.soft_delete::<NamedRecord>(first.id).await.unwrap();

        let result = repo.create::<NamedRecord>("ENGINEERING", Document::new()).await;
        assert_matches!(
            result,
            Err(ApiError::DuplicateName { name, .. }) if name == "ENGINEERING"
        );
    }

    #[tokio::test]
    async fn test_update_keeps_own_name() {
        let repo = repo(EntityKind::School);
        let school: NamedRecord = repo.create("Riverside", Document::new()).await.unwrap();

        let renamed: NamedRecord = repo
            .update(school.id, Some("riverside"), Document::new())
            .await
            .unwrap();
        assert_eq!(renamed.name, "riverside");
        assert!(renamed.updated_at >= school.updated_at);
    }

    #[tokio::test]
    async fn test_deleted_rows_are_not_found() {
        let repo = repo(EntityKind::Sector);
        let sector: NamedRecord = repo.create("Energy", Document::new()).await.unwrap();

        let deleted: NamedRecord = repo.soft_delete(sector.id).await.unwrap();
        assert_eq!(deleted.status, Status::Deleted);

        assert_matches!(
            repo.find_active::<NamedRecord>(sector.id).await,
            Err(ApiError::NotFound { .. })
        );
        assert_matches!(
            repo.soft_delete::<NamedRecord>(sector.id).await,
            Err(ApiError::NotFound { .. })
        );
        assert_matches!(
            repo.update::<NamedRecord>(sector.id, Some("Power"), Document::new())
                .await,
            Err(ApiError::NotFound { .. })
        );
        assert!(!repo.is_active(sector.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_all_empty_is_not_found() {
        let repo = repo(EntityKind::Level);
        assert_matches!(
            repo.find_all::<NamedRecord>(&ListArgs::default()).await,
            Err(ApiError::NotFound { resource_type: "Level", .. })
        );
    }

    #[tokio::test]
    async fn test_find_all_filters_and_counts() {
        let repo = repo(EntityKind::Campus);
        for name in ["North Campus", "South Campus", "Downtown"] {
            repo.create::<NamedRecord>(name, Document::new()).await.unwrap();
        }

        let args = ListArgs {
            filter: Some(FilterArgs {
                name: Some("campus".to_string()),
                ..Default::default()
            }),
            sort: Some(vec![("name".to_string(), 1)]),
            pagination: Some(PageArgs { page: 0, limit: 1 }),
        };
        let rows: Vec<NamedRecord> = repo.find_all(&args).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "North Campus");
        assert_eq!(rows[0].count_document, Some(2));
    }

    #[tokio::test]
    async fn test_row_without_status_is_hidden_everywhere() {
        let store = Arc::new(MemoryStore::new());
        let now = bson::DateTime::now();
        let id = store
            .insert(
                EntityKind::Sector,
                doc! { "name": "Legacy", "createdAt": now, "updatedAt": now },
            )
            .await
            .unwrap();
        let repo = EntityRepository::new(EntityKind::Sector, store);

        assert_matches!(
            repo.find_active::<NamedRecord>(id).await,
            Err(ApiError::NotFound { .. })
        );
        assert!(!repo.is_active(id).await.unwrap());
        assert_matches!(
            repo.find_all::<NamedRecord>(&ListArgs::default()).await,
            Err(ApiError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let repo = repo(EntityKind::Campus);
        assert_matches!(
            repo.find_active::<NamedRecord>(ObjectId::new()).await,
            Err(ApiError::NotFound { resource_type: "Campus", .. })
        );
    }
}
