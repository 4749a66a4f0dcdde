//! Module aggregate root, its DTOs and filter.

use parametria_core::catalog::ConnectionKind;
use parametria_core::listing::{contains_ci, flag_matches, Filter, SortValue, Sortable};
use parametria_core::types::{ObjectId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::entity::Entity;

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// A stored module document. Entities are embedded by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "tipoConexion")]
    pub connection_kind: ConnectionKind,
    pub database: String,
    #[serde(rename = "apiEndpoint")]
    pub api_endpoint: String,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "fechaCreacion")]
    pub created_at: Timestamp,
    #[serde(rename = "usuarioCreacion", default)]
    pub created_by: Option<String>,
    #[serde(rename = "fechaActualizacion", default)]
    pub updated_at: Option<Timestamp>,
    #[serde(rename = "usuarioActualizacion", default)]
    pub updated_by: Option<String>,
    #[serde(rename = "entidades", default)]
    pub entities: Vec<Entity>,
    /// Optimistic concurrency counter, bumped by every persisted write.
    #[serde(default)]
    pub version: i64,
}

impl Module {
    pub fn entity_index(&self, id: ObjectId) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }
}

/// A module without its embedded entities, as returned by the module
/// endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "tipoConexion")]
    pub connection_kind: ConnectionKind,
    pub database: String,
    #[serde(rename = "apiEndpoint")]
    pub api_endpoint: String,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "fechaCreacion")]
    pub created_at: Timestamp,
    #[serde(rename = "usuarioCreacion")]
    pub created_by: Option<String>,
    #[serde(rename = "fechaActualizacion")]
    pub updated_at: Option<Timestamp>,
    #[serde(rename = "usuarioActualizacion")]
    pub updated_by: Option<String>,
}

impl From<&Module> for ModuleSummary {
    fn from(m: &Module) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            description: m.description.clone(),
            connection_kind: m.connection_kind,
            database: m.database.clone(),
            api_endpoint: m.api_endpoint.clone(),
            active: m.active,
            created_at: m.created_at,
            created_by: m.created_by.clone(),
            updated_at: m.updated_at,
            updated_by: m.updated_by.clone(),
        }
    }
}

impl From<Module> for ModuleSummary {
    fn from(m: Module) -> Self {
        Self::from(&m)
    }
}

impl Sortable for Module {
    fn sort_value(&self, field: &str) -> Option<SortValue<'_>> {
        match field {
            "nombre" => Some(SortValue::Text(&self.name)),
            "descripcion" => Some(SortValue::Text(&self.description)),
            "tipoConexion" => Some(SortValue::Text(self.connection_kind.as_str())),
            "database" => Some(SortValue::Text(&self.database)),
            "apiEndpoint" => Some(SortValue::Text(&self.api_endpoint)),
            "activo" => Some(SortValue::Flag(self.active)),
            "fechaCreacion" => Some(SortValue::Time(self.created_at)),
            "fechaActualizacion" => self.updated_at.map(SortValue::Time),
            "usuarioCreacion" => self.created_by.as_deref().map(SortValue::Text),
            "usuarioActualizacion" => self.updated_by.as_deref().map(SortValue::Text),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Payload for creating a module. Also the draft handed to the store, which
/// assigns the id and timestamps.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateModule {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "nombre no debe estar vacío"))]
    pub name: String,
    #[serde(rename = "descripcion")]
    #[validate(length(min = 1, message = "descripcion no debe estar vacío"))]
    pub description: String,
    #[serde(rename = "tipoConexion")]
    pub connection_kind: ConnectionKind,
    #[validate(length(min = 1, message = "database no debe estar vacío"))]
    pub database: String,
    #[serde(rename = "apiEndpoint")]
    #[validate(length(min = 1, message = "apiEndpoint no debe estar vacío"))]
    pub api_endpoint: String,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
    #[serde(rename = "usuarioCreacion")]
    #[validate(length(min = 1, message = "usuarioCreacion no debe estar vacío"))]
    pub created_by: String,
}

/// Payload for updating a module. Only the listed fields can change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateModule {
    #[serde(rename = "nombre", default)]
    #[validate(length(min = 1, message = "nombre no debe estar vacío"))]
    pub name: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "tipoConexion", default)]
    pub connection_kind: Option<ConnectionKind>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(rename = "apiEndpoint", default)]
    pub api_endpoint: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
    #[serde(rename = "usuarioActualizacion")]
    #[validate(length(min = 1, message = "usuarioActualizacion no debe estar vacío"))]
    pub updated_by: String,
}

/// Field-level patch applied by `ModuleStore::find_one_and_update`.
///
/// Serializes to the JSON fragment merged over the stored document, so
/// unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModulePatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "tipoConexion", skip_serializing_if = "Option::is_none")]
    pub connection_kind: Option<ConnectionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(rename = "apiEndpoint", skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "usuarioActualizacion", skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl ModulePatch {
    pub fn deactivate() -> Self {
        Self {
            active: Some(false),
            ..Default::default()
        }
    }

    /// Apply the patch to an in-memory document.
    pub fn apply(&self, module: &mut Module) {
        if let Some(name) = &self.name {
            module.name = name.clone();
        }
        if let Some(description) = &self.description {
            module.description = description.clone();
        }
        if let Some(kind) = self.connection_kind {
            module.connection_kind = kind;
        }
        if let Some(database) = &self.database {
            module.database = database.clone();
        }
        if let Some(endpoint) = &self.api_endpoint {
            module.api_endpoint = endpoint.clone();
        }
        if let Some(active) = self.active {
            module.active = active;
        }
        if let Some(by) = &self.updated_by {
            module.updated_by = Some(by.clone());
        }
    }
}

impl From<UpdateModule> for ModulePatch {
    fn from(dto: UpdateModule) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            connection_kind: dto.connection_kind,
            database: dto.database,
            api_endpoint: dto.api_endpoint,
            active: dto.active,
            updated_by: Some(dto.updated_by),
        }
    }
}

/// Filters accepted by the module listing. Inactive modules are only
/// listed when `activo` is sent explicitly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleFilter {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "tipoConexion", default)]
    pub connection_kind: Option<ConnectionKind>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(rename = "apiEndpoint", default)]
    pub api_endpoint: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
}

impl ModuleFilter {
    pub fn active_scope(&self) -> bool {
        self.active.unwrap_or(true)
    }
}

impl Filter<Module> for ModuleFilter {
    fn matches(&self, m: &Module) -> bool {
        flag_matches(m.active, Some(self.active_scope()))
            && contains_ci(&m.name, self.name.as_deref())
            && contains_ci(&m.description, self.description.as_deref())
            && (self.connection_kind.is_none() || self.connection_kind == Some(m.connection_kind))
            && contains_ci(&m.database, self.database.as_deref())
            && contains_ci(&m.api_endpoint, self.api_endpoint.as_deref())
    }
}
