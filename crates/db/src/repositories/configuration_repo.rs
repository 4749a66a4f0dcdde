//! Read-only composite views of a module's configuration.

use parametria_core::error::CoreError;
use parametria_core::lookup::{Lookup, Missing};
use parametria_core::types::ObjectId;

use super::nested::read_error;
use crate::models::Module;
use crate::store::{ModuleQuery, ModuleStore};

pub struct ConfigurationRepo;

impl ConfigurationRepo {
    /// The active module owning `entity_id`, with its entities narrowed to
    /// that single entity and its attributes.
    pub async fn for_entity(
        store: &dyn ModuleStore,
        entity_id: ObjectId,
    ) -> Result<Lookup<Module>, CoreError> {
        let module = store
            .find_one(&ModuleQuery::owning_entity(entity_id, None))
            .await
            .map_err(read_error)?;

        Ok(match module {
            Some(mut module) => {
                module.entities.retain(|e| e.id == entity_id);
                Lookup::Found(module)
            }
            None => Lookup::Missing(Missing::Module),
        })
    }

    /// The whole active module with every entity, for bulk export.
    pub async fn for_module(
        store: &dyn ModuleStore,
        module_id: ObjectId,
    ) -> Result<Lookup<Module>, CoreError> {
        let module = store
            .find_one(&ModuleQuery::active_by_id(module_id))
            .await
            .map_err(read_error)?;
        Ok(match module {
            Some(module) => Lookup::Found(module),
            None => Lookup::Missing(Missing::Module),
        })
    }
}
