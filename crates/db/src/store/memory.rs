//! In-process module store used by tests and by local runs without a
//! database.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parametria_core::types::ObjectId;
use tokio::sync::RwLock;

use super::{ModuleQuery, ModuleStore, StoreError};
use crate::models::{Module, ModulePatch};

#[derive(Debug, Default)]
pub struct MemoryModuleStore {
    modules: RwLock<Vec<Module>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryModuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent write fail with [`StoreError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is read-only".into()));
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ModuleStore for MemoryModuleStore {
    async fn find_one(&self, query: &ModuleQuery) -> Result<Option<Module>, StoreError> {
        let modules = self.modules.read().await;
        Ok(modules.iter().find(|m| query.matches(m)).cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Module>, StoreError> {
        self.find_one(&ModuleQuery::by_id(id)).await
    }

    async fn find_all(&self) -> Result<Vec<Module>, StoreError> {
        Ok(self.modules.read().await.clone())
    }

    async fn count_matching(&self, query: &ModuleQuery) -> Result<u64, StoreError> {
        let modules = self.modules.read().await;
        Ok(modules.iter().filter(|m| query.matches(m)).count() as u64)
    }

    async fn insert(&self, mut module: Module) -> Result<Module, StoreError> {
        self.check_writable()?;
        module.version = 0;
        self.modules.write().await.push(module.clone());
        self.record_write();
        Ok(module)
    }

    async fn replace(&self, module: &Module) -> Result<Module, StoreError> {
        self.check_writable()?;
        let mut modules = self.modules.write().await;
        let conflict = StoreError::VersionConflict {
            id: module.id,
            expected: module.version,
        };
        let stored = modules
            .iter_mut()
            .find(|m| m.id == module.id)
            .ok_or(conflict)?;
        if stored.version != module.version {
            return Err(StoreError::VersionConflict {
                id: module.id,
                expected: module.version,
            });
        }

        let mut saved = module.clone();
        saved.version += 1;
        *stored = saved.clone();
        self.record_write();
        Ok(saved)
    }

    async fn find_one_and_update(
        &self,
        query: &ModuleQuery,
        patch: &ModulePatch,
    ) -> Result<Option<Module>, StoreError> {
        self.check_writable()?;
        let mut modules = self.modules.write().await;
        let Some(stored) = modules.iter_mut().find(|m| query.matches(m)) else {
            return Ok(None);
        };

        patch.apply(stored);
        stored.updated_at = Some(Utc::now());
        stored.version += 1;
        self.record_write();
        Ok(Some(stored.clone()))
    }
}
