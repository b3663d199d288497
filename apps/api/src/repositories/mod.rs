//! Data access layer for Academia
//!
//! This module centralizes every store operation behind repositories:
//! - `DocumentStore`: the persistence seam, with MongoDB and in-memory adapters
//! - `EntityRepository`: list/get/create/update/soft-delete for any entity
//! - `ProgramRepository`: program writes with reference checks and publishing

pub mod entity;
pub mod memory;
pub mod mongo;
pub mod program;
pub mod store;

pub use entity::EntityRepository;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use program::{ProgramReferences, ProgramRepository};
pub use store::DocumentStore;

use std::sync::Arc;

use crate::models::EntityKind;

/// Entry point to every repository, shared through the GraphQL context
#[derive(Clone)]
pub struct Repositories {
    store: Arc<dyn DocumentStore>,
}

impl Repositories {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Repository for one of the simple named entities
    pub fn entity(&self, kind: EntityKind) -> EntityRepository {
        EntityRepository::new(kind, self.store.clone())
    }

    /// Repository for programs
    pub fn programs(&self) -> ProgramRepository {
        ProgramRepository::new(self.store.clone())
    }

    /// Underlying store
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }
}
