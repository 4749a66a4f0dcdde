//! Repository for top-level modules.

use chrono::Utc;
use parametria_core::error::CoreError;
use parametria_core::listing::{paginate, Page, PageRequest, Sorting};
use parametria_core::lookup::{Lookup, Missing};
use parametria_core::types::ObjectId;

use super::nested::{read_error, write_error};
use crate::models::{
    CreateModule, Module, ModuleFilter, ModulePatch, ModuleSummary, UpdateModule,
};
use crate::store::{ModuleQuery, ModuleStore};

pub const DUPLICATE_ON_CREATE: &str = "Ya existe un módulo con el mismo nombre";
pub const DUPLICATE_ON_UPDATE: &str = "Ya existe otro módulo con el mismo nombre";

/// Provides CRUD operations for modules. Module responses never carry the
/// embedded entities.
pub struct ModuleRepo;

impl ModuleRepo {
    pub async fn list(
        store: &dyn ModuleStore,
        filter: &ModuleFilter,
        sorting: Option<&Sorting>,
        request: PageRequest,
    ) -> Result<Page<ModuleSummary>, CoreError> {
        let modules = store.find_all().await.map_err(read_error)?;
        Ok(paginate(modules, filter, sorting, request).map(ModuleSummary::from))
    }

    /// Find an active module.
    pub async fn get(
        store: &dyn ModuleStore,
        id: ObjectId,
    ) -> Result<Lookup<ModuleSummary>, CoreError> {
        let module = store
            .find_one(&ModuleQuery::active_by_id(id))
            .await
            .map_err(read_error)?;
        Ok(match module {
            Some(module) => Lookup::Found(ModuleSummary::from(module)),
            None => Lookup::Missing(Missing::Module),
        })
    }

    /// Insert a new module unless an active one already has its name.
    pub async fn create(
        store: &dyn ModuleStore,
        input: CreateModule,
    ) -> Result<ModuleSummary, CoreError> {
        let taken = store
            .count_matching(&ModuleQuery::default().active(true).named(&input.name))
            .await
            .map_err(read_error)?;
        if taken > 0 {
            return Err(CoreError::DuplicateName(DUPLICATE_ON_CREATE.into()));
        }

        let module = Module {
            id: ObjectId::new(),
            name: input.name,
            description: input.description,
            connection_kind: input.connection_kind,
            database: input.database,
            api_endpoint: input.api_endpoint,
            active: input.active.unwrap_or(true),
            created_at: Utc::now(),
            created_by: Some(input.created_by),
            updated_at: None,
            updated_by: None,
            entities: Vec::new(),
            version: 0,
        };
        let saved = store
            .insert(module)
            .await
            .map_err(|e| write_error(e, "Error al crear el módulo"))?;

        tracing::info!(module_id = %saved.id, name = %saved.name, "Module created");
        Ok(ModuleSummary::from(saved))
    }

    /// Patch an active module. A new name must not belong to another active
    /// module.
    pub async fn update(
        store: &dyn ModuleStore,
        id: ObjectId,
        input: UpdateModule,
    ) -> Result<Lookup<ModuleSummary>, CoreError> {
        if let Some(name) = &input.name {
            let taken = store
                .count_matching(&ModuleQuery::default().active(true).named(name).excluding(id))
                .await
                .map_err(read_error)?;
            if taken > 0 {
                return Err(CoreError::DuplicateName(DUPLICATE_ON_UPDATE.into()));
            }
        }

        let updated = store
            .find_one_and_update(&ModuleQuery::active_by_id(id), &ModulePatch::from(input))
            .await
            .map_err(|e| write_error(e, "Error al actualizar el módulo"))?;

        Ok(match updated {
            Some(module) => {
                tracing::info!(module_id = %module.id, "Module updated");
                Lookup::Found(ModuleSummary::from(module))
            }
            None => Lookup::Missing(Missing::Module),
        })
    }

    /// Soft-delete an active module.
    pub async fn remove(store: &dyn ModuleStore, id: ObjectId) -> Result<Lookup<bool>, CoreError> {
        let updated = store
            .find_one_and_update(&ModuleQuery::active_by_id(id), &ModulePatch::deactivate())
            .await
            .map_err(|e| write_error(e, "Error al eliminar el módulo"))?;

        Ok(match updated {
            Some(module) => {
                tracing::info!(module_id = %module.id, "Module deactivated");
                Lookup::Found(true)
            }
            None => Lookup::Missing(Missing::Module),
        })
    }
}
