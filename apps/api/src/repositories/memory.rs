//! In-process [`DocumentStore`] for tests and local development
//!
//! Selected with `DATABASE_URL=memory://`. It evaluates the typed
//! [`Pipeline`] directly and enforces case-insensitive name uniqueness on
//! write, mirroring the unique index the MongoDB adapter creates.

use std::sync::Arc;

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use dashmap::DashMap;

use super::store::DocumentStore;
use crate::error::{ApiError, ApiResult};
use crate::models::EntityKind;
use crate::pipeline::{Pipeline, COUNT_FIELD};

/// Document store holding every collection in memory
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<EntityKind, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents stored for an entity, deleted rows included
    pub fn len(&self, kind: EntityKind) -> usize {
        self.collections.get(&kind).map_or(0, |rows| rows.len())
    }

    /// Whether no document is stored for an entity
    pub fn is_empty(&self, kind: EntityKind) -> bool {
        self.len(kind) == 0
    }

    fn name_taken(rows: &[Document], name: &str, except: Option<ObjectId>) -> bool {
        let name = name.to_lowercase();
        rows.iter().any(|row| {
            row.get_object_id("_id").ok() != except
                && row
                    .get_str("name")
                    .is_ok_and(|existing| existing.to_lowercase() == name)
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn aggregate(&self, kind: EntityKind, pipeline: &Pipeline) -> ApiResult<Vec<Document>> {
        let mut rows: Vec<Document> = match self.collections.get(&kind) {
            Some(rows) => rows
                .iter()
                .filter(|row| pipeline.filter.matches(row))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        rows.sort_by(|a, b| pipeline.sort.compare(a, b));

        let Some(page) = pipeline.page else {
            return Ok(rows);
        };

        let total = rows.len() as i64;
        let skip = usize::try_from(page.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
        Ok(rows
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|mut row| {
                row.insert(COUNT_FIELD, total);
                row
            })
            .collect())
    }

    async fn find_by_id(&self, kind: EntityKind, id: ObjectId) -> ApiResult<Option<Document>> {
        Ok(self.collections.get(&kind).and_then(|rows| {
            rows.iter()
                .find(|row| row.get_object_id("_id").ok() == Some(id))
                .cloned()
        }))
    }

    async fn find_by_ids(&self, kind: EntityKind, ids: &[ObjectId]) -> ApiResult<Vec<Document>> {
        Ok(self
            .collections
            .get(&kind)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.get_object_id("_id").is_ok_and(|id| ids.contains(&id)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_by_name(&self, kind: EntityKind, name: &str) -> ApiResult<Option<Document>> {
        let name = name.to_lowercase();
        Ok(self.collections.get(&kind).and_then(|rows| {
            rows.iter()
                .find(|row| {
                    row.get_str("name")
                        .is_ok_and(|existing| existing.to_lowercase() == name)
                })
                .cloned()
        }))
    }

    async fn insert(&self, kind: EntityKind, mut document: Document) -> ApiResult<ObjectId> {
        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            _ => ObjectId::new(),
        };
        document.insert("_id", id);

        let mut rows = self.collections.entry(kind).or_default();
        if kind.unique_name() {
            if let Ok(name) = document.get_str("name") {
                if Self::name_taken(&rows, name, None) {
                    return Err(ApiError::duplicate_name(kind.label(), name));
                }
            }
        }
        rows.push(document);
        Ok(id)
    }

    async fn update_by_id(
        &self,
        kind: EntityKind,
        id: ObjectId,
        changes: Document,
    ) -> ApiResult<Option<Document>> {
        let Some(mut rows) = self.collections.get_mut(&kind) else {
            return Ok(None);
        };

        if kind.unique_name() {
            if let Ok(name) = changes.get_str("name") {
                if Self::name_taken(&rows, name, Some(id)) {
                    return Err(ApiError::duplicate_name(kind.label(), name));
                }
            }
        }

        let Some(row) = rows
            .iter_mut()
            .find(|row| row.get_object_id("_id").ok() == Some(id))
        else {
            return Ok(None);
        };
        for (field, value) in changes {
            row.insert(field, value);
        }
        Ok(Some(row.clone()))
    }

    async fn ping(&self) -> ApiResult<()> {
        Ok(())
    }

    async fn ensure_indexes(&self) -> ApiResult<()> {
        Ok(())
    }
}
