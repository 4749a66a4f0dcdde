//! Shared fixtures for repository tests against the in-memory store.

#![allow(dead_code)]

use parametria_core::catalog::{ConnectionKind, DataType, OperationKind};
use parametria_core::lookup::Lookup;
use parametria_core::types::ObjectId;
use parametria_db::models::{
    CreateEntity, CreateModule, CreateTableAttribute, Entity, ModuleSummary, TableAttribute,
};
use parametria_db::repositories::{AttributeRepo, EntityRepo, ModuleRepo};
use parametria_db::store::MemoryModuleStore;

pub fn new_module(name: &str) -> CreateModule {
    CreateModule {
        name: name.to_string(),
        description: format!("Módulo {name}"),
        connection_kind: ConnectionKind::Postgres,
        database: "parametria".to_string(),
        api_endpoint: "http://template.local".to_string(),
        active: None,
        created_by: "tester".to_string(),
    }
}

pub fn new_entity(name: &str) -> CreateEntity {
    CreateEntity {
        id: None,
        name: name.to_string(),
        table_name: format!("tb_{}", name.to_lowercase()),
        description: None,
        active: None,
        operations: vec![OperationKind::GetOne, OperationKind::GetMany],
        created_by: Some("tester".to_string()),
    }
}

pub fn new_attribute(name: &str) -> CreateTableAttribute {
    CreateTableAttribute {
        id: None,
        name: name.to_string(),
        column_name: name.to_lowercase(),
        data_type: DataType::String,
        options: None,
        is_primary: None,
        is_required: None,
        is_searchable: None,
        is_visible: None,
        is_editable: None,
        sequence: None,
        active: None,
        created_by: "tester".to_string(),
    }
}

pub fn found<T: std::fmt::Debug>(lookup: Lookup<T>) -> T {
    match lookup {
        Lookup::Found(value) => value,
        Lookup::Missing(missing) => panic!("expected a value, got {missing:?}"),
    }
}

pub async fn seed_module(store: &MemoryModuleStore, name: &str) -> ModuleSummary {
    ModuleRepo::create(store, new_module(name)).await.unwrap()
}

pub async fn seed_entity(store: &MemoryModuleStore, module_id: ObjectId, name: &str) -> Entity {
    found(EntityRepo::create(store, module_id, new_entity(name)).await.unwrap())
}

pub async fn seed_attribute(
    store: &MemoryModuleStore,
    entity_id: ObjectId,
    name: &str,
) -> TableAttribute {
    found(AttributeRepo::create(store, entity_id, new_attribute(name)).await.unwrap())
}
