//! MongoDB adapter for the [`DocumentStore`] seam

use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use futures_util::TryStreamExt;
use mongodb::options::{
    ClientOptions, Collation, CollationStrength, FindOneAndUpdateOptions, FindOneOptions,
    IndexOptions, ReturnDocument,
};
use mongodb::{Client, Collection, Database, IndexModel};

use academia_shared_config::DatabaseConfig;

use super::store::DocumentStore;
use crate::error::{ApiError, ApiResult};
use crate::models::EntityKind;
use crate::pipeline::Pipeline;

/// Name of the case-insensitive unique index on `name`
const NAME_INDEX: &str = "name_unique_ci";

/// Case- and accent-insensitive comparison used for name uniqueness
fn name_collation() -> Collation {
    Collation::builder()
        .locale("en".to_string())
        .strength(CollationStrength::Secondary)
        .build()
}

/// Document store backed by a MongoDB database
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect using the configured URL and database name
    pub async fn connect(config: &DatabaseConfig) -> ApiResult<Self> {
        let mut options = ClientOptions::parse(&config.url).await?;
        options.app_name = Some("academia-api".to_string());
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));

        let client = Client::with_options(options)?;
        tracing::info!(database = %config.name, "MongoDB client created");

        Ok(Self {
            database: client.database(&config.name),
        })
    }

    fn collection(&self, kind: EntityKind) -> Collection<Document> {
        self.database.collection(kind.collection())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn aggregate(&self, kind: EntityKind, pipeline: &Pipeline) -> ApiResult<Vec<Document>> {
        let stages = pipeline.stages();
        tracing::debug!(collection = kind.collection(), ?stages, "Running aggregation");

        let cursor = self.collection(kind).aggregate(stages, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, kind: EntityKind, id: ObjectId) -> ApiResult<Option<Document>> {
        Ok(self
            .collection(kind)
            .find_one(doc! { "_id": id }, None)
            .await?)
    }

    async fn find_by_ids(&self, kind: EntityKind, ids: &[ObjectId]) -> ApiResult<Vec<Document>> {
        let ids: Vec<Bson> = ids.iter().copied().map(Bson::ObjectId).collect();
        let cursor = self
            .collection(kind)
            .find(doc! { "_id": { "$in": ids } }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_name(&self, kind: EntityKind, name: &str) -> ApiResult<Option<Document>> {
        let options = FindOneOptions::builder()
            .collation(name_collation())
            .build();
        Ok(self
            .collection(kind)
            .find_one(doc! { "name": name }, options)
            .await?)
    }

    async fn insert(&self, kind: EntityKind, document: Document) -> ApiResult<ObjectId> {
        let result = self.collection(kind).insert_one(document, None).await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            ApiError::Internal(format!(
                "{} insert returned a non ObjectId key",
                kind.collection()
            ))
        })
    }

    async fn update_by_id(
        &self,
        kind: EntityKind,
        id: ObjectId,
        changes: Document,
    ) -> ApiResult<Option<Document>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        Ok(self
            .collection(kind)
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": changes }, options)
            .await?)
    }

    async fn ping(&self) -> ApiResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    async fn ensure_indexes(&self) -> ApiResult<()> {
        for kind in EntityKind::ALL.into_iter().filter(|k| k.unique_name()) {
            let index = IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(
                    IndexOptions::builder()
                        .name(NAME_INDEX.to_string())
                        .unique(true)
                        .collation(name_collation())
                        .build(),
                )
                .build();
            self.collection(kind).create_index(index, None).await?;
            tracing::info!(collection = kind.collection(), "Ensured unique name index");
        }
        Ok(())
    }
}
