//! Entities embedded in a module.

use parametria_core::catalog::OperationKind;
use parametria_core::listing::{
    contains_ci, flag_matches, id_matches, superset, Filter, SortValue, Sortable,
};
use parametria_core::types::{ObjectId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::attribute::TableAttribute;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nombreTabla")]
    pub table_name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "operaciones", default)]
    pub operations: Vec<OperationKind>,
    #[serde(rename = "fechaCreacion")]
    pub created_at: Timestamp,
    #[serde(rename = "usuarioCreacion", default)]
    pub created_by: Option<String>,
    #[serde(rename = "fechaActualizacion", default)]
    pub updated_at: Option<Timestamp>,
    #[serde(rename = "usuarioActualizacion", default)]
    pub updated_by: Option<String>,
    #[serde(rename = "atributosTabla", default)]
    pub attributes: Vec<TableAttribute>,
}

impl Entity {
    /// Build a new active-by-default entity from a create payload.
    pub fn from_create(dto: CreateEntity, id: ObjectId, now: Timestamp) -> Self {
        Self {
            id,
            name: dto.name,
            table_name: dto.table_name,
            description: dto.description.unwrap_or_default(),
            active: dto.active.unwrap_or(true),
            operations: dto.operations,
            created_at: now,
            created_by: dto.created_by.clone(),
            updated_at: Some(now),
            updated_by: dto.created_by,
            attributes: Vec::new(),
        }
    }

    pub fn attribute_index(&self, id: ObjectId) -> Option<usize> {
        self.attributes.iter().position(|a| a.id == id)
    }
}

/// An entity without its attributes, as returned by entity listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nombreTabla")]
    pub table_name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "operaciones")]
    pub operations: Vec<OperationKind>,
    #[serde(rename = "fechaCreacion")]
    pub created_at: Timestamp,
    #[serde(rename = "usuarioCreacion")]
    pub created_by: Option<String>,
    #[serde(rename = "fechaActualizacion")]
    pub updated_at: Option<Timestamp>,
    #[serde(rename = "usuarioActualizacion")]
    pub updated_by: Option<String>,
}

impl From<Entity> for EntitySummary {
    fn from(e: Entity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            table_name: e.table_name,
            description: e.description,
            active: e.active,
            operations: e.operations,
            created_at: e.created_at,
            created_by: e.created_by,
            updated_at: e.updated_at,
            updated_by: e.updated_by,
        }
    }
}

impl Sortable for Entity {
    fn sort_value(&self, field: &str) -> Option<SortValue<'_>> {
        match field {
            "nombre" => Some(SortValue::Text(&self.name)),
            "nombreTabla" => Some(SortValue::Text(&self.table_name)),
            "descripcion" => Some(SortValue::Text(&self.description)),
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

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEntity {
    /// Caller-chosen identifier. A fresh one is generated when absent.
    #[serde(rename = "_id", default)]
    pub id: Option<ObjectId>,
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "nombre no debe estar vacío"))]
    pub name: String,
    #[serde(rename = "nombreTabla")]
    #[validate(length(min = 1, message = "nombreTabla no debe estar vacío"))]
    pub table_name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
    #[serde(rename = "operaciones")]
    #[validate(length(min = 1, message = "operaciones no debe estar vacío"))]
    pub operations: Vec<OperationKind>,
    #[serde(rename = "usuarioCreacion", default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEntity {
    #[serde(rename = "nombre", default)]
    #[validate(length(min = 1, message = "nombre no debe estar vacío"))]
    pub name: Option<String>,
    #[serde(rename = "nombreTabla", default)]
    #[validate(length(min = 1, message = "nombreTabla no debe estar vacío"))]
    pub table_name: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
    #[serde(rename = "operaciones", default)]
    #[validate(length(min = 1, message = "operaciones no debe estar vacío"))]
    pub operations: Option<Vec<OperationKind>>,
    #[serde(rename = "usuarioActualizacion")]
    #[validate(length(min = 1, message = "usuarioActualizacion no debe estar vacío"))]
    pub updated_by: String,
}

impl UpdateEntity {
    /// Overwrite the fields present in the payload. Attributes are never
    /// touched by an entity update.
    pub fn apply(self, entity: &mut Entity) {
        if let Some(name) = self.name {
            entity.name = name;
        }
        if let Some(table_name) = self.table_name {
            entity.table_name = table_name;
        }
        if let Some(description) = self.description {
            entity.description = description;
        }
        if let Some(active) = self.active {
            entity.active = active;
        }
        if let Some(operations) = self.operations {
            entity.operations = operations;
        }
        entity.updated_by = Some(self.updated_by);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityFilter {
    #[serde(rename = "_id", default)]
    pub id: Option<ObjectId>,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "nombreTabla", default)]
    pub table_name: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "operaciones", default)]
    pub operations: Option<Vec<OperationKind>>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
}

impl Filter<Entity> for EntityFilter {
    fn matches(&self, e: &Entity) -> bool {
        flag_matches(e.active, Some(self.active.unwrap_or(true)))
            && id_matches(Some(&e.id), self.id.as_ref())
            && contains_ci(&e.name, self.name.as_deref())
            && contains_ci(&e.table_name, self.table_name.as_deref())
            && contains_ci(&e.description, self.description.as_deref())
            && superset(&e.operations, self.operations.as_deref())
    }
}
