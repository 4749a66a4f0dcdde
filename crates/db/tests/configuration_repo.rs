//! Configuration views against the in-memory store.

mod common;

use parametria_core::lookup::Missing;
use parametria_core::types::ObjectId;
use parametria_db::repositories::{ConfigurationRepo, ModuleRepo};
use parametria_db::store::MemoryModuleStore;

use common::{found, seed_attribute, seed_entity, seed_module};

#[tokio::test]
async fn entity_configuration_narrows_to_one_entity() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    seed_entity(&store, module.id, "Ventas").await;
    let compras = seed_entity(&store, module.id, "Compras").await;
    seed_attribute(&store, compras.id, "codigo").await;

    let config = found(ConfigurationRepo::for_entity(&store, compras.id).await.unwrap());
    assert_eq!(config.id, module.id);
    assert_eq!(config.entities.len(), 1);
    assert_eq!(config.entities[0].id, compras.id);
    assert_eq!(config.entities[0].attributes.len(), 1);
}

#[tokio::test]
async fn module_configuration_keeps_every_entity() {
    let store = MemoryModuleStore::new();
    let module = seed_module(&store, "Comercial").await;
    seed_entity(&store, module.id, "Ventas").await;
    seed_entity(&store, module.id, "Compras").await;

    let config = found(ConfigurationRepo::for_module(&store, module.id).await.unwrap());
    assert_eq!(config.entities.len(), 2);
}

#[tokio::test]
async fn inactive_or_unknown_modules_are_missing() {
    let store = MemoryModuleStore::new();
    let unknown = ConfigurationRepo::for_entity(&store, ObjectId::new()).await.unwrap();
    assert_eq!(unknown.missing(), Some(Missing::Module));

    let module = seed_module(&store, "Comercial").await;
    let ventas = seed_entity(&store, module.id, "Ventas").await;
    found(ModuleRepo::remove(&store, module.id).await.unwrap());

    let result = ConfigurationRepo::for_entity(&store, ventas.id).await.unwrap();
    assert_eq!(result.missing(), Some(Missing::Module));
    let result = ConfigurationRepo::for_module(&store, module.id).await.unwrap();
    assert_eq!(result.missing(), Some(Missing::Module));
}
