//! Repository for table attributes, embedded two levels deep
//! (module → entity → attribute).

use chrono::Utc;
use parametria_core::error::CoreError;
use parametria_core::listing::{Page, PageRequest, Sorting};
use parametria_core::lookup::{Lookup, Missing};
use parametria_core::types::ObjectId;

use super::nested::{EmbeddedCollection, Messages, NestedRepo};
use crate::models::{
    CreateTableAttribute, Module, TableAttribute, TableAttributeFilter, UpdateTableAttribute,
};
use crate::store::{ModuleQuery, ModuleStore};

/// Attributes of one active entity inside an active module.
#[derive(Debug, Clone, Copy)]
pub struct EntityAttributes {
    pub entity_id: ObjectId,
}

impl EmbeddedCollection for EntityAttributes {
    type Item = TableAttribute;

    const MESSAGES: Messages = Messages {
        target_missing: Missing::Attribute,
        duplicate_on_create: "Ya existe un atributo con el mismo nombre o nombreColumna",
        duplicate_on_update: "Ya existe un atributo con el mismo nombre o nombreColumna",
        create_failed: "Error al crear el atributo",
        update_failed: "Error al actualizar el atributo",
        remove_failed: "Error al eliminar el atributo",
    };

    fn owner_query(&self) -> ModuleQuery {
        ModuleQuery::owning_entity(self.entity_id, Some(true))
    }

    fn items<'m>(&self, module: &'m Module) -> Result<&'m [TableAttribute], Missing> {
        module
            .entity_index(self.entity_id)
            .map(|i| module.entities[i].attributes.as_slice())
            .ok_or(Missing::Entity)
    }

    fn items_mut<'m>(
        &self,
        module: &'m mut Module,
    ) -> Result<&'m mut Vec<TableAttribute>, Missing> {
        let index = module.entity_index(self.entity_id).ok_or(Missing::Entity)?;
        Ok(&mut module.entities[index].attributes)
    }
}

/// Provides list, create, update and soft-delete for table attributes.
pub struct AttributeRepo;

impl AttributeRepo {
    pub async fn list(
        store: &dyn ModuleStore,
        entity_id: ObjectId,
        filter: &TableAttributeFilter,
        sorting: Option<&Sorting>,
        request: PageRequest,
    ) -> Result<Lookup<Page<TableAttribute>>, CoreError> {
        NestedRepo::list(store, &EntityAttributes { entity_id }, filter, sorting, request).await
    }

    pub async fn create(
        store: &dyn ModuleStore,
        entity_id: ObjectId,
        input: CreateTableAttribute,
    ) -> Result<Lookup<TableAttribute>, CoreError> {
        let id = input.id.unwrap_or_else(ObjectId::new);
        let attribute = TableAttribute::from_create(input, id, Utc::now());
        NestedRepo::create(store, &EntityAttributes { entity_id }, attribute).await
    }

    pub async fn update(
        store: &dyn ModuleStore,
        entity_id: ObjectId,
        attribute_id: ObjectId,
        input: UpdateTableAttribute,
    ) -> Result<Lookup<TableAttribute>, CoreError> {
        let new_name = input.name.clone();
        NestedRepo::update(
            store,
            &EntityAttributes { entity_id },
            attribute_id,
            new_name.as_deref(),
            |attribute| input.apply(attribute),
        )
        .await
    }

    pub async fn remove(
        store: &dyn ModuleStore,
        entity_id: ObjectId,
        attribute_id: ObjectId,
    ) -> Result<Lookup<bool>, CoreError> {
        NestedRepo::remove(store, &EntityAttributes { entity_id }, attribute_id).await
    }
}
