//! Generic operations on a collection embedded in a module document.
//!
//! A collection is described by an [`EmbeddedCollection`]: which module owns
//! it (as a [`ModuleQuery`]) and how to reach the items inside the loaded
//! document. [`NestedRepo`] then implements list, create, update and remove
//! once for every kind of embedded item. Mutations load the whole module,
//! change it in memory and write it back with [`ModuleStore::replace`].

use chrono::Utc;
use parametria_core::error::CoreError;
use parametria_core::listing::{paginate, Filter, Page, PageRequest, Sortable, Sorting};
use parametria_core::lookup::{Lookup, Missing};
use parametria_core::types::{ObjectId, Timestamp};

use crate::models::{Entity, Module, TableAttribute};
use crate::store::{ModuleQuery, ModuleStore, StoreError};

const READ_FAILED: &str = "Error al consultar los módulos";
const CONFLICT: &str = "El módulo fue modificado por otra operación, intente nuevamente";

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// An item stored inside a module document.
pub trait EmbeddedItem: Sortable + Clone + Send + Sync {
    fn id(&self) -> ObjectId;
    fn set_id(&mut self, id: ObjectId);
    fn name(&self) -> &str;
    fn set_active(&mut self, active: bool);
    fn touch(&mut self, now: Timestamp);
}

/// Fixed messages reported by the mutations of one collection kind.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub target_missing: Missing,
    pub duplicate_on_create: &'static str,
    pub duplicate_on_update: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub remove_failed: &'static str,
}

/// Path from a module query to an embedded collection.
pub trait EmbeddedCollection: Send + Sync {
    type Item: EmbeddedItem;

    const MESSAGES: Messages;

    /// Query resolving the owning module.
    fn owner_query(&self) -> ModuleQuery;

    fn items<'m>(&self, module: &'m Module) -> Result<&'m [Self::Item], Missing>;

    fn items_mut<'m>(&self, module: &'m mut Module) -> Result<&'m mut Vec<Self::Item>, Missing>;
}

// ---------------------------------------------------------------------------
// Store error mapping
// ---------------------------------------------------------------------------

pub(crate) fn read_error(err: StoreError) -> CoreError {
    tracing::error!(error = %err, "Module store read failed");
    CoreError::Internal(READ_FAILED.into())
}

pub(crate) fn write_error(err: StoreError, failure: &'static str) -> CoreError {
    match err {
        StoreError::VersionConflict { id, expected } => {
            tracing::warn!(module_id = %id, expected, "Concurrent module modification");
            CoreError::ConcurrentModification(CONFLICT.into())
        }
        other => {
            tracing::error!(error = %other, "{failure}");
            CoreError::Persistence(failure.into())
        }
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Operations shared by every embedded collection.
pub struct NestedRepo;

impl NestedRepo {
    /// Load the owning module.
    pub async fn owner<C: EmbeddedCollection>(
        store: &dyn ModuleStore,
        scope: &C,
    ) -> Result<Lookup<Module>, CoreError> {
        let module = store
            .find_one(&scope.owner_query())
            .await
            .map_err(read_error)?;
        Ok(match module {
            Some(module) => Lookup::Found(module),
            None => Lookup::Missing(Missing::Module),
        })
    }

    /// Filter, sort and paginate the collection.
    pub async fn list<C, F>(
        store: &dyn ModuleStore,
        scope: &C,
        filter: &F,
        sorting: Option<&Sorting>,
        request: PageRequest,
    ) -> Result<Lookup<Page<C::Item>>, CoreError>
    where
        C: EmbeddedCollection,
        F: Filter<C::Item> + Sync + ?Sized,
    {
        let module = match Self::owner(store, scope).await? {
            Lookup::Found(module) => module,
            Lookup::Missing(missing) => return Ok(missing.into()),
        };
        let items = match scope.items(&module) {
            Ok(items) => items,
            Err(missing) => return Ok(missing.into()),
        };
        Ok(Lookup::Found(paginate(
            items.iter().cloned(),
            filter,
            sorting,
            request,
        )))
    }

    /// Find one item by id, active or not.
    pub async fn get<C: EmbeddedCollection>(
        store: &dyn ModuleStore,
        scope: &C,
        target: ObjectId,
    ) -> Result<Lookup<C::Item>, CoreError> {
        let module = match Self::owner(store, scope).await? {
            Lookup::Found(module) => module,
            Lookup::Missing(missing) => return Ok(missing.into()),
        };
        let items = match scope.items(&module) {
            Ok(items) => items,
            Err(missing) => return Ok(missing.into()),
        };
        Ok(match items.iter().find(|item| item.id() == target) {
            Some(item) => Lookup::Found(item.clone()),
            None => Lookup::Missing(C::MESSAGES.target_missing),
        })
    }

    /// Append `item` unless a sibling already has its name.
    pub async fn create<C: EmbeddedCollection>(
        store: &dyn ModuleStore,
        scope: &C,
        item: C::Item,
    ) -> Result<Lookup<C::Item>, CoreError> {
        let messages = C::MESSAGES;
        let mut module = match Self::owner(store, scope).await? {
            Lookup::Found(module) => module,
            Lookup::Missing(missing) => return Ok(missing.into()),
        };
        let items = match scope.items_mut(&mut module) {
            Ok(items) => items,
            Err(missing) => return Ok(missing.into()),
        };
        if items.iter().any(|sibling| sibling.name() == item.name()) {
            return Err(CoreError::DuplicateName(messages.duplicate_on_create.into()));
        }
        items.push(item);

        let saved = store
            .replace(&module)
            .await
            .map_err(|e| write_error(e, messages.create_failed))?;
        let created = scope
            .items(&saved)
            .ok()
            .and_then(|items| items.last())
            .cloned()
            .ok_or_else(|| CoreError::Persistence(messages.create_failed.into()))?;

        tracing::info!(module_id = %saved.id, item_id = %created.id(), "Embedded item created");
        Ok(Lookup::Found(created))
    }

    /// Apply `change` to the item with id `target`.
    ///
    /// `new_name`, when given, is checked against every other sibling. The
    /// item keeps its id and gets `fechaActualizacion` stamped.
    pub async fn update<C, U>(
        store: &dyn ModuleStore,
        scope: &C,
        target: ObjectId,
        new_name: Option<&str>,
        change: U,
    ) -> Result<Lookup<C::Item>, CoreError>
    where
        C: EmbeddedCollection,
        U: FnOnce(&mut C::Item) + Send,
    {
        let messages = C::MESSAGES;
        let mut module = match Self::owner(store, scope).await? {
            Lookup::Found(module) => module,
            Lookup::Missing(missing) => return Ok(missing.into()),
        };
        let items = match scope.items_mut(&mut module) {
            Ok(items) => items,
            Err(missing) => return Ok(missing.into()),
        };
        let Some(index) = items.iter().position(|item| item.id() == target) else {
            return Ok(Lookup::Missing(messages.target_missing));
        };
        if let Some(name) = new_name {
            let taken = items
                .iter()
                .any(|sibling| sibling.id() != target && sibling.name() == name);
            if taken {
                return Err(CoreError::DuplicateName(messages.duplicate_on_update.into()));
            }
        }

        let item = &mut items[index];
        change(item);
        item.set_id(target);
        item.touch(Utc::now());

        let saved = store
            .replace(&module)
            .await
            .map_err(|e| write_error(e, messages.update_failed))?;
        let updated = scope
            .items(&saved)
            .ok()
            .and_then(|items| items.get(index))
            .cloned()
            .ok_or_else(|| CoreError::Persistence(messages.update_failed.into()))?;

        tracing::info!(module_id = %saved.id, item_id = %target, "Embedded item updated");
        Ok(Lookup::Found(updated))
    }

    /// Mark the item with id `target` inactive. Nothing is ever removed from
    /// the collection.
    pub async fn remove<C: EmbeddedCollection>(
        store: &dyn ModuleStore,
        scope: &C,
        target: ObjectId,
    ) -> Result<Lookup<bool>, CoreError> {
        let messages = C::MESSAGES;
        let mut module = match Self::owner(store, scope).await? {
            Lookup::Found(module) => module,
            Lookup::Missing(missing) => return Ok(missing.into()),
        };
        let items = match scope.items_mut(&mut module) {
            Ok(items) => items,
            Err(missing) => return Ok(missing.into()),
        };
        let Some(item) = items.iter_mut().find(|item| item.id() == target) else {
            return Ok(Lookup::Missing(messages.target_missing));
        };
        item.set_active(false);

        let saved = store
            .replace(&module)
            .await
            .map_err(|e| write_error(e, messages.remove_failed))?;

        tracing::info!(module_id = %saved.id, item_id = %target, "Embedded item deactivated");
        Ok(Lookup::Found(true))
    }
}

// ---------------------------------------------------------------------------
// Item impls
// ---------------------------------------------------------------------------

impl EmbeddedItem for Entity {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = Some(now);
    }
}

impl EmbeddedItem for TableAttribute {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = Some(now);
    }
}
