//! Module repository behaviour against the in-memory store.

mod common;

use assert_matches::assert_matches;
use parametria_core::catalog::ConnectionKind;
use parametria_core::error::CoreError;
use parametria_core::listing::{PageRequest, SortDirection, Sorting};
use parametria_core::lookup::{Lookup, Missing};
use parametria_core::types::ObjectId;
use parametria_db::models::{ModuleFilter, UpdateModule};
use parametria_db::repositories::ModuleRepo;
use parametria_db::store::MemoryModuleStore;

use common::{found, new_module, seed_module};

fn rename(name: &str) -> UpdateModule {
    UpdateModule {
        name: Some(name.to_string()),
        updated_by: "editor".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_stamps_defaults() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Ventas").await;

    assert!(module.active);
    assert_eq!(module.created_by.as_deref(), Some("tester"));
    assert!(module.updated_at.is_none());
}

#[tokio::test]
async fn duplicate_active_name_is_rejected_without_writing() {
    let store = MemoryModuleStore::new();
    seed_module(&store, "Ventas").await;
    let writes = store.write_count();

    let err = ModuleRepo::create(&store, new_module("Ventas")).await.unwrap_err();
    assert_matches!(err, CoreError::DuplicateName(msg) if msg == "Ya existe un módulo con el mismo nombre");
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn name_of_removed_module_can_be_reused() {
    let store = MemoryModuleStore::new();
    let old = seed_module(&store, "Ventas").await;
    found(ModuleRepo::remove(&store, old.id).await.unwrap());

    let again = ModuleRepo::create(&store, new_module("Ventas")).await.unwrap();
    assert_ne!(again.id, old.id);
}

#[tokio::test]
async fn list_hides_inactive_unless_requested() {
    let store = MemoryModuleStore::new();
    seed_module(&store, "Ventas").await;
    let gone = seed_module(&store, "Compras").await;
    found(ModuleRepo::remove(&store, gone.id).await.unwrap());

    let page = ModuleRepo::list(&store, &ModuleFilter::default(), None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].name, "Ventas");

    let inactive = ModuleFilter {
        active: Some(false),
        ..Default::default()
    };
    let page = ModuleRepo::list(&store, &inactive, None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, gone.id);
}

#[tokio::test]
async fn list_filters_by_connection_kind_and_sorts() {
    let store = MemoryModuleStore::new();
    seed_module(&store, "Beta").await;
    seed_module(&store, "Alfa").await;
    let mut oracle = new_module("Gamma");
    oracle.connection_kind = ConnectionKind::Oracle;
    ModuleRepo::create(&store, oracle).await.unwrap();

    let filter = ModuleFilter {
        connection_kind: Some(ConnectionKind::Postgres),
        ..Default::default()
    };
    let sorting: Sorting = [("nombre".to_string(), SortDirection::Asc)].into_iter().collect();
    let page = ModuleRepo::list(&store, &filter, Some(&sorting), PageRequest::default())
        .await
        .unwrap();

    let names: Vec<_> = page.items.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Alfa", "Beta"]);
}

#[tokio::test]
async fn get_hides_inactive_modules() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Ventas").await;
    assert!(ModuleRepo::get(&store, module.id).await.unwrap().is_found());

    found(ModuleRepo::remove(&store, module.id).await.unwrap());
    assert_eq!(
        ModuleRepo::get(&store, module.id).await.unwrap(),
        Lookup::Missing(Missing::Module)
    );
}

#[tokio::test]
async fn update_checks_other_modules_before_writing() {
    let store = MemoryModuleStore::new();
    seed_module(&store, "Ventas").await;
    let compras = seed_module(&store, "Compras").await;
    let writes = store.write_count();

    let err = ModuleRepo::update(&store, compras.id, rename("Ventas"))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::DuplicateName(msg) if msg == "Ya existe otro módulo con el mismo nombre");
    assert_eq!(store.write_count(), writes);

    // Keeping its own name is not a collision.
    let same = found(
        ModuleRepo::update(&store, compras.id, rename("Compras"))
            .await
            .unwrap(),
    );
    assert_eq!(same.updated_by.as_deref(), Some("editor"));
    assert!(same.updated_at.is_some());
}

#[tokio::test]
async fn update_and_remove_of_unknown_module_are_missing() {
    let store = MemoryModuleStore::new();
    let id = ObjectId::new();

    assert_eq!(
        ModuleRepo::update(&store, id, rename("x")).await.unwrap(),
        Lookup::Missing(Missing::Module)
    );
    assert_eq!(
        ModuleRepo::remove(&store, id).await.unwrap(),
        Lookup::Missing(Missing::Module)
    );
}

#[tokio::test]
async fn failed_insert_reports_fixed_message() {
    let store = MemoryModuleStore::new();
    store.set_fail_writes(true);

    let err = ModuleRepo::create(&store, new_module("Ventas")).await.unwrap_err();
    assert_matches!(err, CoreError::Persistence(msg) if msg == "Error al crear el módulo");
}
