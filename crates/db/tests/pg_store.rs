//! PostgreSQL store tests. They need a reachable `DATABASE_URL` and are
//! ignored by default; run them with `--ignored`.

mod common;

use assert_matches::assert_matches;
use parametria_core::lookup::Missing;
use parametria_core::types::ObjectId;
use parametria_db::models::ModulePatch;
use parametria_db::repositories::{AttributeRepo, ConfigurationRepo, EntityRepo, ModuleRepo};
use parametria_db::store::{ModuleQuery, ModuleStore, PgModuleStore, StoreError};
use sqlx::PgPool;

use common::{found, new_attribute, new_entity, new_module};

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn bootstrap_and_health(pool: PgPool) {
    parametria_db::health_check(&pool).await.unwrap();
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn nested_crud_round_trip(pool: PgPool) {
    let store = PgModuleStore::new(pool);
    let module = ModuleRepo::create(&store, new_module("Comercial")).await.unwrap();
    let entity = found(
        EntityRepo::create(&store, module.id, new_entity("Ventas"))
            .await
            .unwrap(),
    );
    let attribute = found(
        AttributeRepo::create(&store, entity.id, new_attribute("codigo"))
            .await
            .unwrap(),
    );

    let config = found(ConfigurationRepo::for_entity(&store, entity.id).await.unwrap());
    assert_eq!(config.entities[0].attributes[0].id, attribute.id);
    assert_eq!(config.version, 2);

    found(AttributeRepo::remove(&store, entity.id, attribute.id).await.unwrap());
    let stored = store.find_by_id(module.id).await.unwrap().unwrap();
    assert!(!stored.entities[0].attributes[0].active);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn queries_use_jsonb_containment(pool: PgPool) {
    let store = PgModuleStore::new(pool);
    let module = ModuleRepo::create(&store, new_module("Comercial")).await.unwrap();
    let entity = found(
        EntityRepo::create(&store, module.id, new_entity("Ventas"))
            .await
            .unwrap(),
    );

    let owner = store
        .find_one(&ModuleQuery::owning_entity(entity.id, Some(true)))
        .await
        .unwrap();
    assert_eq!(owner.map(|m| m.id), Some(module.id));

    let none = store
        .find_one(&ModuleQuery::owning_entity(entity.id, Some(false)))
        .await
        .unwrap();
    assert!(none.is_none());

    let count = store
        .count_matching(&ModuleQuery::default().active(true).named("Comercial"))
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn stale_replace_and_patch(pool: PgPool) {
    let store = PgModuleStore::new(pool);
    let module = ModuleRepo::create(&store, new_module("Comercial")).await.unwrap();
    let snapshot = store.find_by_id(module.id).await.unwrap().unwrap();

    store.replace(&snapshot).await.unwrap();
    assert_matches!(
        store.replace(&snapshot).await,
        Err(StoreError::VersionConflict { expected: 0, .. })
    );

    let patched = store
        .find_one_and_update(&ModuleQuery::active_by_id(module.id), &ModulePatch::deactivate())
        .await
        .unwrap()
        .unwrap();
    assert!(!patched.active);
    assert!(patched.updated_at.is_some());
    assert_eq!(patched.version, 2);

    let gone = ModuleRepo::get(&store, module.id).await.unwrap();
    assert_eq!(gone.missing(), Some(Missing::Module));
    let unknown = store.find_by_id(ObjectId::new()).await.unwrap();
    assert!(unknown.is_none());
}
