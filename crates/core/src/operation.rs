//! Generic CRUD operation descriptors forwarded to the template API, and
//! their structural validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{DataType, OperationKind};
use crate::error::CoreError;
use crate::listing::SortDirection;

pub const MISSING_ENDPOINT: &str = "El endpoint es requerido para ejecutar la operación";
pub const INVALID_ENDPOINT: &str =
    "El endpoint debe ser una URL válida que comience con http:// o https://";
pub const NO_FIELDS: &str = "La definición de entidad debe tener al menos un campo";
pub const NO_PRIMARY_FIELD: &str = "La definición de entidad debe tener al menos un campo primario";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub column_name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_searchable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_editable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_rules: Option<Vec<ValidationRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_auto_incremental: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequency: Option<String>,
}

/// Schema of the downstream table an operation targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub connection_id: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOptions {
    #[serde(default = "default_page")]
    pub pagina: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingOption {
    pub field: String,
    #[serde(default = "default_direction")]
    pub direction: SortDirection,
}

fn default_direction() -> SortDirection {
    SortDirection::Asc
}

/// A CRUD request for the template API.
///
/// `endpoint` is the template API base URL. It is read from the inbound
/// request but never serialized, so the forwarded body is the descriptor
/// without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicOperation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub entity_definition: EntityDefinition,
    #[serde(default, skip_serializing)]
    pub endpoint: Option<String>,
    #[serde(rename = "filtros", default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(rename = "paginacion", default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<Vec<SortingOption>>,
}

/// Check an operation before anything is sent downstream.
///
/// The endpoint is checked first; a missing endpoint short-circuits every
/// other rule.
pub fn validate_operation(op: &DynamicOperation) -> Result<(), CoreError> {
    let endpoint = op
        .endpoint
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| CoreError::InvalidOperation(MISSING_ENDPOINT.into()))?;

    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(CoreError::InvalidOperation(INVALID_ENDPOINT.into()));
    }

    if op.kind.requires_id() && !has_id(op.id.as_ref()) {
        return Err(CoreError::InvalidOperation(format!(
            "La operación {} requiere un ID",
            op.kind.as_str()
        )));
    }

    if op.kind.requires_data() && !has_data(op.data.as_ref()) {
        return Err(CoreError::InvalidOperation(format!(
            "La operación {} requiere datos",
            op.kind.as_str()
        )));
    }

    let fields = &op.entity_definition.fields;
    if fields.is_empty() {
        return Err(CoreError::InvalidOperation(NO_FIELDS.into()));
    }
    if !fields.iter().any(|f| f.is_primary == Some(true)) {
        return Err(CoreError::InvalidOperation(NO_PRIMARY_FIELD.into()));
    }

    Ok(())
}

fn has_id(id: Option<&Value>) -> bool {
    match id {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

fn has_data(data: Option<&Value>) -> bool {
    matches!(data, Some(Value::Object(fields)) if !fields.is_empty())
}
