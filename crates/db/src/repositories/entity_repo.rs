//! Repository for entities embedded in modules.

use chrono::Utc;
use parametria_core::error::CoreError;
use parametria_core::listing::{Page, PageRequest, Sorting};
use parametria_core::lookup::{Lookup, Missing};
use parametria_core::types::ObjectId;

use super::nested::{EmbeddedCollection, Messages, NestedRepo};
use crate::models::{CreateEntity, Entity, EntityFilter, EntitySummary, Module, UpdateEntity};
use crate::store::{ModuleQuery, ModuleStore};

/// How the module owning the entities is located.
#[derive(Debug, Clone, Copy)]
pub enum EntityScope {
    /// The active module with this id.
    InModule(ObjectId),
    /// The active module containing this active entity.
    Owning(ObjectId),
}

impl EmbeddedCollection for EntityScope {
    type Item = Entity;

    const MESSAGES: Messages = Messages {
        target_missing: Missing::Entity,
        duplicate_on_create: "Ya existe una entidad con el mismo nombre",
        duplicate_on_update: "Ya existe una entidad con el mismo nombre en este módulo",
        create_failed: "Error al crear la entidad",
        update_failed: "Error al actualizar la entidad",
        remove_failed: "Error al eliminar la entidad",
    };

    fn owner_query(&self) -> ModuleQuery {
        match *self {
            Self::InModule(module_id) => ModuleQuery::active_by_id(module_id),
            Self::Owning(entity_id) => ModuleQuery::owning_entity(entity_id, Some(true)),
        }
    }

    fn items<'m>(&self, module: &'m Module) -> Result<&'m [Entity], Missing> {
        Ok(&module.entities)
    }

    fn items_mut<'m>(&self, module: &'m mut Module) -> Result<&'m mut Vec<Entity>, Missing> {
        Ok(&mut module.entities)
    }
}

/// Provides list, get, create, update and soft-delete for entities.
pub struct EntityRepo;

impl EntityRepo {
    /// List the entities of an active module. Attributes are omitted.
    pub async fn list(
        store: &dyn ModuleStore,
        module_id: ObjectId,
        filter: &EntityFilter,
        sorting: Option<&Sorting>,
        request: PageRequest,
    ) -> Result<Lookup<Page<EntitySummary>>, CoreError> {
        let page = NestedRepo::list(
            store,
            &EntityScope::InModule(module_id),
            filter,
            sorting,
            request,
        )
        .await?;
        Ok(page.map(|page| page.map(EntitySummary::from)))
    }

    /// Find an active entity in any active module.
    pub async fn get(
        store: &dyn ModuleStore,
        entity_id: ObjectId,
    ) -> Result<Lookup<Entity>, CoreError> {
        NestedRepo::get(store, &EntityScope::Owning(entity_id), entity_id).await
    }

    pub async fn create(
        store: &dyn ModuleStore,
        module_id: ObjectId,
        input: CreateEntity,
    ) -> Result<Lookup<Entity>, CoreError> {
        let id = input.id.unwrap_or_else(ObjectId::new);
        let entity = Entity::from_create(input, id, Utc::now());
        NestedRepo::create(store, &EntityScope::InModule(module_id), entity).await
    }

    pub async fn update(
        store: &dyn ModuleStore,
        module_id: ObjectId,
        entity_id: ObjectId,
        input: UpdateEntity,
    ) -> Result<Lookup<Entity>, CoreError> {
        let new_name = input.name.clone();
        NestedRepo::update(
            store,
            &EntityScope::InModule(module_id),
            entity_id,
            new_name.as_deref(),
            |entity| input.apply(entity),
        )
        .await
    }

    /// Soft-delete an entity located by its own id.
    pub async fn remove(
        store: &dyn ModuleStore,
        entity_id: ObjectId,
    ) -> Result<Lookup<bool>, CoreError> {
        NestedRepo::remove(store, &EntityScope::Owning(entity_id), entity_id).await
    }
}
