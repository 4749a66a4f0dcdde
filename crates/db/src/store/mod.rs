//! Document store for modules.
//!
//! A module is always read and written as a whole document. Every write
//! bumps the document's `version`; [`ModuleStore::replace`] only succeeds
//! when the caller still holds the latest version.

use async_trait::async_trait;
use parametria_core::listing::flag_matches;
use parametria_core::types::ObjectId;

use crate::models::{Module, ModulePatch};

pub mod memory;
pub mod postgres;

pub use memory::MemoryModuleStore;
pub use postgres::PgModuleStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("module {id} was modified concurrently (expected version {expected})")]
    VersionConflict { id: ObjectId, expected: i64 },

    #[error("write rejected: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Constraint on an embedded entity of the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMatch {
    pub id: ObjectId,
    pub active: Option<bool>,
}

/// Conjunction of constraints a module document must satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleQuery {
    pub id: Option<ObjectId>,
    pub active: Option<bool>,
    pub name: Option<String>,
    pub exclude_id: Option<ObjectId>,
    pub entity: Option<EntityMatch>,
}

impl ModuleQuery {
    pub fn by_id(id: ObjectId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// Active module with the given id.
    pub fn active_by_id(id: ObjectId) -> Self {
        Self::by_id(id).active(true)
    }

    /// Active module containing the entity with the given id.
    pub fn owning_entity(entity_id: ObjectId, entity_active: Option<bool>) -> Self {
        Self::default().active(true).with_entity(entity_id, entity_active)
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn excluding(mut self, id: ObjectId) -> Self {
        self.exclude_id = Some(id);
        self
    }

    pub fn with_entity(mut self, id: ObjectId, active: Option<bool>) -> Self {
        self.entity = Some(EntityMatch { id, active });
        self
    }

    pub fn matches(&self, module: &Module) -> bool {
        if self.id.is_some_and(|id| id != module.id) {
            return false;
        }
        if self.exclude_id.is_some_and(|id| id == module.id) {
            return false;
        }
        if self.active.is_some_and(|active| active != module.active) {
            return false;
        }
        if self.name.as_deref().is_some_and(|name| name != module.name) {
            return false;
        }
        match &self.entity {
            Some(wanted) => module
                .entities
                .iter()
                .any(|e| e.id == wanted.id && flag_matches(e.active, wanted.active)),
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ModuleStore: Send + Sync {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// First module matching the query, in insertion order.
    async fn find_one(&self, query: &ModuleQuery) -> Result<Option<Module>, StoreError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Module>, StoreError>;

    /// Every stored module, active or not, in insertion order.
    async fn find_all(&self) -> Result<Vec<Module>, StoreError>;

    async fn count_matching(&self, query: &ModuleQuery) -> Result<u64, StoreError>;

    /// Store a new document. Its `version` is reset to 0.
    async fn insert(&self, module: Module) -> Result<Module, StoreError>;

    /// Overwrite the stored document with `module`.
    ///
    /// Fails with [`StoreError::VersionConflict`] when the stored version is
    /// no longer `module.version`. Returns the saved document with its new
    /// version.
    async fn replace(&self, module: &Module) -> Result<Module, StoreError>;

    /// Atomically apply `patch` to the first module matching `query`,
    /// stamping `fechaActualizacion`. Returns the updated document, or
    /// `None` when nothing matched.
    async fn find_one_and_update(
        &self,
        query: &ModuleQuery,
        patch: &ModulePatch,
    ) -> Result<Option<Module>, StoreError>;
}
