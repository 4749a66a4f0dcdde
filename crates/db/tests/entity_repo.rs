//! Entity repository behaviour against the in-memory store.

mod common;

use async_trait::async_trait;
use assert_matches::assert_matches;
use parametria_core::catalog::OperationKind;
use parametria_core::error::CoreError;
use parametria_core::listing::{Pagination, PageRequest};
use parametria_core::lookup::{Lookup, Missing};
use parametria_core::types::ObjectId;
use parametria_db::models::{EntityFilter, Module, ModulePatch, UpdateEntity};
use parametria_db::repositories::{EntityRepo, ModuleRepo};
use parametria_db::store::{MemoryModuleStore, ModuleQuery, ModuleStore, StoreError};

use common::{found, new_entity, seed_entity, seed_module};

fn rename(name: &str) -> UpdateEntity {
    UpdateEntity {
        name: Some(name.to_string()),
        updated_by: "editor".to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_single_entity_module() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    let ventas = seed_entity(&store, module.id, "Ventas").await;

    let page = found(
        EntityRepo::list(&store, module.id, &EntityFilter::default(), None, PageRequest::default())
            .await
            .unwrap(),
    );
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, ventas.id);
    assert_eq!(
        page.pagination,
        Pagination { total: 1, page: 1, size: 10, pages: 1 }
    );
}

#[tokio::test]
async fn list_under_missing_or_inactive_module() {
    let store = MemoryModuleStore::new();
    let result = EntityRepo::list(
        &store,
        ObjectId::new(),
        &EntityFilter::default(),
        None,
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(result.missing(), Some(Missing::Module));

    let module = seed_module(&store, "Comercial").await;
    found(ModuleRepo::remove(&store, module.id).await.unwrap());
    let result = EntityRepo::list(&store, module.id, &EntityFilter::default(), None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(result.missing(), Some(Missing::Module));
}

#[tokio::test]
async fn pagination_counts_matches_before_slicing() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    for name in ["Ventas", "Compras", "Clientes", "Productos", "Proveedores"] {
        seed_entity(&store, module.id, name).await;
    }
    let filter = EntityFilter {
        name: Some("pro".to_string()),
        ..Default::default()
    };

    let page = found(
        EntityRepo::list(&store, module.id, &filter, None, PageRequest::new(1, 1))
            .await
            .unwrap(),
    );
    assert_eq!(page.pagination.total, 2);
    assert_eq!(page.pagination.pages, 2);

    let past = found(
        EntityRepo::list(&store, module.id, &filter, None, PageRequest::new(5, 1))
            .await
            .unwrap(),
    );
    assert!(past.items.is_empty());
    assert_eq!(past.pagination.total, 2);
}

#[tokio::test]
async fn listing_twice_gives_the_same_page() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    for name in ["A", "B", "C"] {
        seed_entity(&store, module.id, name).await;
    }
    let first = EntityRepo::list(&store, module.id, &EntityFilter::default(), None, PageRequest::new(1, 2))
        .await
        .unwrap();
    let second = EntityRepo::list(&store, module.id, &EntityFilter::default(), None, PageRequest::new(1, 2))
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn removed_entities_are_listed_only_on_request() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    seed_entity(&store, module.id, "Ventas").await;
    let compras = seed_entity(&store, module.id, "Compras").await;
    found(EntityRepo::remove(&store, compras.id).await.unwrap());

    let active = found(
        EntityRepo::list(&store, module.id, &EntityFilter::default(), None, PageRequest::default())
            .await
            .unwrap(),
    );
    assert_eq!(active.pagination.total, 1);

    let inactive = EntityFilter {
        active: Some(false),
        ..Default::default()
    };
    let page = found(
        EntityRepo::list(&store, module.id, &inactive, None, PageRequest::default())
            .await
            .unwrap(),
    );
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, compras.id);
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_keeps_caller_supplied_id() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    let id = ObjectId::new();
    let mut input = new_entity("Ventas");
    input.id = Some(id);

    let entity = found(EntityRepo::create(&store, module.id, input).await.unwrap());
    assert_eq!(entity.id, id);
    assert!(entity.active);
    assert_eq!(entity.operations, [OperationKind::GetOne, OperationKind::GetMany]);
}

#[tokio::test]
async fn duplicate_name_counts_removed_siblings() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    let ventas = seed_entity(&store, module.id, "Ventas").await;
    found(EntityRepo::remove(&store, ventas.id).await.unwrap());
    let writes = store.write_count();

    let err = EntityRepo::create(&store, module.id, new_entity("Ventas"))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::DuplicateName(msg) if msg == "Ya existe una entidad con el mismo nombre");
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn update_of_unknown_entity_is_missing() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;

    let result = EntityRepo::update(&store, module.id, ObjectId::new(), rename("x"))
        .await
        .unwrap();
    assert_eq!(result, Lookup::Missing(Missing::Entity));
}

#[tokio::test]
async fn update_rejects_sibling_name_but_allows_own() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    seed_entity(&store, module.id, "Ventas").await;
    let compras = seed_entity(&store, module.id, "Compras").await;

    let err = EntityRepo::update(&store, module.id, compras.id, rename("Ventas"))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::DuplicateName(msg) if msg == "Ya existe una entidad con el mismo nombre en este módulo");

    let updated = found(
        EntityRepo::update(&store, module.id, compras.id, rename("Compras"))
            .await
            .unwrap(),
    );
    assert_eq!(updated.id, compras.id);
    assert_eq!(updated.updated_by.as_deref(), Some("editor"));
}

#[tokio::test]
async fn update_merges_only_present_fields() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    let ventas = seed_entity(&store, module.id, "Ventas").await;

    let input = UpdateEntity {
        description: Some("Ventas al detal".to_string()),
        updated_by: "editor".to_string(),
        ..Default::default()
    };
    let updated = found(EntityRepo::update(&store, module.id, ventas.id, input).await.unwrap());
    assert_eq!(updated.name, "Ventas");
    assert_eq!(updated.table_name, ventas.table_name);
    assert_eq!(updated.description, "Ventas al detal");
    assert_eq!(updated.created_at, ventas.created_at);
}

#[tokio::test]
async fn get_and_remove_resolve_by_entity_id() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    let ventas = seed_entity(&store, module.id, "Ventas").await;

    assert_eq!(found(EntityRepo::get(&store, ventas.id).await.unwrap()).name, "Ventas");
    assert_eq!(EntityRepo::remove(&store, ventas.id).await.unwrap(), Lookup::Found(true));

    let stored = store.find_by_id(module.id).await.unwrap().unwrap();
    assert_eq!(stored.entities.len(), 1);
    assert!(!stored.entities[0].active);

    assert_eq!(
        EntityRepo::get(&store, ventas.id).await.unwrap(),
        Lookup::Missing(Missing::Module)
    );
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

/// Store whose reads return a snapshot taken before another writer got in.
struct StaleReads {
    inner: MemoryModuleStore,
    snapshot: Module,
}

#[async_trait]
impl ModuleStore for StaleReads {
    async fn find_one(&self, _query: &ModuleQuery) -> Result<Option<Module>, StoreError> {
        Ok(Some(self.snapshot.clone()))
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Module>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Module>, StoreError> {
        self.inner.find_all().await
    }

    async fn count_matching(&self, query: &ModuleQuery) -> Result<u64, StoreError> {
        self.inner.count_matching(query).await
    }

    async fn insert(&self, module: Module) -> Result<Module, StoreError> {
        self.inner.insert(module).await
    }

    async fn replace(&self, module: &Module) -> Result<Module, StoreError> {
        self.inner.replace(module).await
    }

    async fn find_one_and_update(
        &self,
        query: &ModuleQuery,
        patch: &ModulePatch,
    ) -> Result<Option<Module>, StoreError> {
        self.inner.find_one_and_update(query, patch).await
    }
}

#[tokio::test]
async fn lost_update_is_reported_as_conflict() {
    let inner = MemoryModuleStore::new();
    let module = seed_module(&inner, "Comercial").await;
    let ventas = seed_entity(&inner, module.id, "Ventas").await;
    let snapshot = inner.find_by_id(module.id).await.unwrap().unwrap();

    // A concurrent writer adds an entity after the snapshot was read.
    seed_entity(&inner, module.id, "Compras").await;

    let stale = StaleReads { inner, snapshot };
    let err = EntityRepo::update(&stale, module.id, ventas.id, rename("Ventas 2"))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::ConcurrentModification(_));

    let stored = stale.inner.find_by_id(module.id).await.unwrap().unwrap();
    let names: Vec<_> = stored.entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Ventas", "Compras"]);
}

#[tokio::test]
async fn failed_write_reports_fixed_message() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    store.set_fail_writes(true);

    let err = EntityRepo::create(&store, module.id, new_entity("Ventas"))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Persistence(msg) if msg == "Error al crear la entidad");
}
