//! DataLoader implementations for GraphQL
//!
//! Program references (speciality, sector, level, campus, school, scholar
//! season) are resolved through one [`RecordLoader`] per entity. A fresh
//! [`Loaders`] set is created for every incoming request, so its cache
//! coalesces lookups within that request only.

mod record;

pub use record::RecordLoader;

use std::sync::Arc;

use async_graphql::dataloader::{CacheFactory, DataLoader, HashMapCache, Loader};
use bson::oid::ObjectId;

use crate::error::ApiError;
use crate::models::{EntityKind, NamedRecord};
use crate::repositories::DocumentStore;

/// Resolve `keys` through a loader, keeping input order and length
///
/// Duplicate keys are fetched once; keys with no row resolve to `None`.
pub async fn load_in_order<L, C>(
    loader: &DataLoader<L, C>,
    keys: &[ObjectId],
) -> Result<Vec<Option<L::Value>>, L::Error>
where
    L: Loader<ObjectId>,
    C: CacheFactory,
{
    let found = loader.load_many(keys.iter().copied()).await?;
    Ok(keys.iter().map(|key| found.get(key).cloned()).collect())
}

/// Loader for one entity, caching rows for the life of the request
pub type RecordDataLoader = DataLoader<RecordLoader, HashMapCache>;

/// Request-scoped set of DataLoader instances
pub struct Loaders {
    speciality: RecordDataLoader,
    sector: RecordDataLoader,
    level: RecordDataLoader,
    campus: RecordDataLoader,
    school: RecordDataLoader,
    scholar_season: RecordDataLoader,
}

impl Loaders {
    /// Create all data loaders for one request
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let loader = |kind| {
            DataLoader::with_cache(
                RecordLoader::new(kind, store.clone()),
                tokio::spawn,
                HashMapCache::default(),
            )
        };
        Self {
            speciality: loader(EntityKind::Speciality),
            sector: loader(EntityKind::Sector),
            level: loader(EntityKind::Level),
            campus: loader(EntityKind::Campus),
            school: loader(EntityKind::School),
            scholar_season: loader(EntityKind::ScholarSeason),
        }
    }

    /// Loader for a related entity; programs are never loaded by reference
    pub fn get(&self, kind: EntityKind) -> Option<&RecordDataLoader> {
        match kind {
            EntityKind::Speciality => Some(&self.speciality),
            EntityKind::Sector => Some(&self.sector),
            EntityKind::Level => Some(&self.level),
            EntityKind::Campus => Some(&self.campus),
            EntityKind::School => Some(&self.school),
            EntityKind::ScholarSeason => Some(&self.scholar_season),
            EntityKind::Program => None,
        }
    }

    /// Load one related row, `None` when it does not exist
    pub async fn load_one(
        &self,
        kind: EntityKind,
        id: ObjectId,
    ) -> Result<Option<NamedRecord>, Arc<ApiError>> {
        let Some(loader) = self.get(kind) else {
            return Ok(None);
        };
        let mut rows = load_in_order(loader, &[id]).await?;
        Ok(rows.pop().flatten())
    }
}
