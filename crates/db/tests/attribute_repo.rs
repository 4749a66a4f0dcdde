//! Table-attribute repository behaviour against the in-memory store.

mod common;

use assert_matches::assert_matches;
use parametria_core::error::CoreError;
use parametria_core::listing::{PageRequest, SortDirection, Sorting};
use parametria_core::lookup::{Lookup, Missing};
use parametria_core::types::ObjectId;
use parametria_db::models::{TableAttributeFilter, UpdateTableAttribute};
use parametria_db::repositories::{AttributeRepo, EntityRepo};
use parametria_db::store::{MemoryModuleStore, ModuleStore};

use common::{found, new_attribute, seed_attribute, seed_entity, seed_module};

#[tokio::test]
async fn duplicate_attribute_name_is_rejected_without_writing() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    let entity = seed_entity(&store, module.id, "Ventas").await;
    seed_attribute(&store, entity.id, "codigo").await;
    let writes = store.write_count();

    let err = AttributeRepo::create(&store, entity.id, new_attribute("codigo"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        CoreError::DuplicateName(msg) if msg == "Ya existe un atributo con el mismo nombre o nombreColumna"
    );
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn remove_marks_only_the_target_inactive() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    let entity = seed_entity(&store, module.id, "Ventas").await;
    let a = seed_attribute(&store, entity.id, "codigo").await;
    let b = seed_attribute(&store, entity.id, "nombre").await;
    let c = seed_attribute(&store, entity.id, "fecha").await;

    let result = AttributeRepo::remove(&store, entity.id, a.id).await.unwrap();
    assert_eq!(result, Lookup::Found(true));

    let stored = store.find_by_id(module.id).await.unwrap().unwrap();
    let attributes = &stored.entities[0].attributes;
    assert_eq!(attributes.len(), 3);
    assert!(!attributes[0].active);

    let mut expected_a = a.clone();
    expected_a.active = false;
    assert_eq!(attributes[0], expected_a);
    assert_eq!(attributes[1], b);
    assert_eq!(attributes[2], c);
}

#[tokio::test]
async fn missing_ancestors_and_targets() {
    let store = MemoryModuleStore::new();
    let unknown = ObjectId::new();

    let list = AttributeRepo::list(
        &store,
        unknown,
        &TableAttributeFilter::default(),
        None,
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert_eq!(list.missing(), Some(Missing::Module));

    let module = seed_module(&store, "Comercial").await;
    let entity = seed_entity(&store, module.id, "Ventas").await;
    let result = AttributeRepo::remove(&store, entity.id, unknown).await.unwrap();
    assert_eq!(result, Lookup::Missing(Missing::Attribute));

    found(EntityRepo::remove(&store, entity.id).await.unwrap());
    let result = AttributeRepo::create(&store, entity.id, new_attribute("codigo"))
        .await
        .unwrap();
    assert_eq!(result.missing(), Some(Missing::Module));
}

#[tokio::test]
async fn list_filters_and_sorts_attributes() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    let entity = seed_entity(&store, module.id, "Ventas").await;

    let mut estado = new_attribute("estado");
    estado.options = Some(vec!["A".to_string(), "I".to_string()]);
    estado.is_searchable = Some(true);
    found(AttributeRepo::create(&store, entity.id, estado).await.unwrap());

    let mut tipo = new_attribute("tipo");
    tipo.options = Some(vec!["X".to_string(), "I".to_string()]);
    tipo.is_searchable = Some(true);
    found(AttributeRepo::create(&store, entity.id, tipo).await.unwrap());

    seed_attribute(&store, entity.id, "codigo").await;

    let filter = TableAttributeFilter {
        options: Some(vec!["I".to_string()]),
        is_searchable: Some(true),
        ..Default::default()
    };
    let sorting: Sorting = [("nombre".to_string(), SortDirection::Desc)].into_iter().collect();
    let page = found(
        AttributeRepo::list(&store, entity.id, &filter, Some(&sorting), PageRequest::default())
            .await
            .unwrap(),
    );
    let names: Vec<_> = page.items.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["tipo", "estado"]);
    assert_eq!(page.pagination.total, 2);
}

#[tokio::test]
async fn update_checks_names_and_restamps_id() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    let entity = seed_entity(&store, module.id, "Ventas").await;
    seed_attribute(&store, entity.id, "codigo").await;
    let nombre = seed_attribute(&store, entity.id, "nombre").await;

    let clash = UpdateTableAttribute {
        name: Some("codigo".to_string()),
        ..Default::default()
    };
    assert_matches!(
        AttributeRepo::update(&store, entity.id, nombre.id, clash).await,
        Err(CoreError::DuplicateName(_))
    );

    let change = UpdateTableAttribute {
        is_required: Some(true),
        updated_by: Some("editor".to_string()),
        ..Default::default()
    };
    let updated = found(
        AttributeRepo::update(&store, entity.id, nombre.id, change)
            .await
            .unwrap(),
    );
    assert_eq!(updated.id, nombre.id);
    assert!(updated.is_required);
    assert_eq!(updated.name, "nombre");
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn failed_remove_reports_fixed_message() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    let entity = seed_entity(&store, module.id, "Ventas").await;
    let codigo = seed_attribute(&store, entity.id, "codigo").await;
    store.set_fail_writes(true);

    let err = AttributeRepo::remove(&store, entity.id, codigo.id)
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Persistence(msg) if msg == "Error al eliminar el atributo");
}
