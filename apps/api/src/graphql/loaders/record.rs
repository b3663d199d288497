//! Record DataLoader for batched fetching
//!
//! This loader batches the id lookups issued while resolving one request
//! into a single multi-key fetch per entity, solving the N+1 problem when
//! resolving the references of many programs.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;
use bson::oid::ObjectId;

use crate::error::ApiError;
use crate::models::{EntityKind, NamedRecord};
use crate::repositories::DocumentStore;

/// DataLoader for batching lookups of one named entity
#[derive(Clone)]
pub struct RecordLoader {
    kind: EntityKind,
    store: Arc<dyn DocumentStore>,
}

impl RecordLoader {
    pub fn new(kind: EntityKind, store: Arc<dyn DocumentStore>) -> Self {
        Self { kind, store }
    }
}

impl Loader<ObjectId> for RecordLoader {
    type Value = NamedRecord;
    type Error = Arc<ApiError>;

    async fn load(&self, keys: &[ObjectId]) -> Result<HashMap<ObjectId, Self::Value>, Self::Error> {
        tracing::debug!(entity = self.kind.label(), keys = keys.len(), "Batch loading rows");

        let rows = self
            .store
            .find_by_ids(self.kind, keys)
            .await
            .map_err(Arc::new)?;

        rows.into_iter()
            .map(|row| {
                bson::from_document::<NamedRecord>(row)
                    .map(|record| (record.id, record))
                    .map_err(|e| Arc::new(ApiError::from(e)))
            })
            .collect()
    }
}
