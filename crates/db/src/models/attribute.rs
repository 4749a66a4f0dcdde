//! Table attributes embedded in an entity.

use parametria_core::catalog::DataType;
use parametria_core::listing::{
    contains_ci, flag_matches, id_matches, intersects, Filter, SortValue, Sortable,
};
use parametria_core::types::{ObjectId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAttribute {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nombreColumna")]
    pub column_name: String,
    #[serde(rename = "tipoDato")]
    pub data_type: DataType,
    #[serde(rename = "opciones", default)]
    pub options: Vec<String>,
    #[serde(rename = "esPrimario", default)]
    pub is_primary: bool,
    #[serde(rename = "esRequerido", default)]
    pub is_required: bool,
    #[serde(rename = "esBuscable", default)]
    pub is_searchable: bool,
    #[serde(rename = "esVisible", default)]
    pub is_visible: bool,
    #[serde(rename = "esEditable", default)]
    pub is_editable: bool,
    #[serde(rename = "secuencia", default)]
    pub sequence: String,
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
}

impl TableAttribute {
    /// Build a new attribute. Unset flags are `false`, `activo` is `true`.
    pub fn from_create(dto: CreateTableAttribute, id: ObjectId, now: Timestamp) -> Self {
        Self {
            id,
            name: dto.name,
            column_name: dto.column_name,
            data_type: dto.data_type,
            options: dto.options.unwrap_or_default(),
            is_primary: dto.is_primary.unwrap_or(false),
            is_required: dto.is_required.unwrap_or(false),
            is_searchable: dto.is_searchable.unwrap_or(false),
            is_visible: dto.is_visible.unwrap_or(false),
            is_editable: dto.is_editable.unwrap_or(false),
            sequence: dto.sequence.unwrap_or_default(),
            active: dto.active.unwrap_or(true),
            created_at: now,
            created_by: Some(dto.created_by),
            updated_at: None,
            updated_by: None,
        }
    }
}

impl Sortable for TableAttribute {
    fn sort_value(&self, field: &str) -> Option<SortValue<'_>> {
        match field {
            "nombre" => Some(SortValue::Text(&self.name)),
            "nombreColumna" => Some(SortValue::Text(&self.column_name)),
            "tipoDato" => Some(SortValue::Text(self.data_type.as_str())),
            "secuencia" => Some(SortValue::Text(&self.sequence)),
            "esPrimario" => Some(SortValue::Flag(self.is_primary)),
            "esRequerido" => Some(SortValue::Flag(self.is_required)),
            "esBuscable" => Some(SortValue::Flag(self.is_searchable)),
            "esVisible" => Some(SortValue::Flag(self.is_visible)),
            "esEditable" => Some(SortValue::Flag(self.is_editable)),
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
pub struct CreateTableAttribute {
    #[serde(rename = "_id", default)]
    pub id: Option<ObjectId>,
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "nombre no debe estar vacío"))]
    pub name: String,
    #[serde(rename = "nombreColumna")]
    #[validate(length(min = 1, message = "nombreColumna no debe estar vacío"))]
    pub column_name: String,
    #[serde(rename = "tipoDato")]
    pub data_type: DataType,
    #[serde(rename = "opciones", default)]
    pub options: Option<Vec<String>>,
    #[serde(rename = "esPrimario", default)]
    pub is_primary: Option<bool>,
    #[serde(rename = "esRequerido", default)]
    pub is_required: Option<bool>,
    #[serde(rename = "esBuscable", default)]
    pub is_searchable: Option<bool>,
    #[serde(rename = "esVisible", default)]
    pub is_visible: Option<bool>,
    #[serde(rename = "esEditable", default)]
    pub is_editable: Option<bool>,
    #[serde(rename = "secuencia", default)]
    pub sequence: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
    #[serde(rename = "usuarioCreacion")]
    #[validate(length(min = 1, message = "usuarioCreacion no debe estar vacío"))]
    pub created_by: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTableAttribute {
    #[serde(rename = "nombre", default)]
    #[validate(length(min = 1, message = "nombre no debe estar vacío"))]
    pub name: Option<String>,
    #[serde(rename = "nombreColumna", default)]
    #[validate(length(min = 1, message = "nombreColumna no debe estar vacío"))]
    pub column_name: Option<String>,
    #[serde(rename = "tipoDato", default)]
    pub data_type: Option<DataType>,
    #[serde(rename = "opciones", default)]
    pub options: Option<Vec<String>>,
    #[serde(rename = "esPrimario", default)]
    pub is_primary: Option<bool>,
    #[serde(rename = "esRequerido", default)]
    pub is_required: Option<bool>,
    #[serde(rename = "esBuscable", default)]
    pub is_searchable: Option<bool>,
    #[serde(rename = "esVisible", default)]
    pub is_visible: Option<bool>,
    #[serde(rename = "esEditable", default)]
    pub is_editable: Option<bool>,
    #[serde(rename = "secuencia", default)]
    pub sequence: Option<String>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
    #[serde(rename = "usuarioActualizacion", default)]
    pub updated_by: Option<String>,
}

impl UpdateTableAttribute {
    pub fn apply(self, attr: &mut TableAttribute) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(&mut attr.name, self.name);
        set(&mut attr.column_name, self.column_name);
        set(&mut attr.data_type, self.data_type);
        set(&mut attr.options, self.options);
        set(&mut attr.is_primary, self.is_primary);
        set(&mut attr.is_required, self.is_required);
        set(&mut attr.is_searchable, self.is_searchable);
        set(&mut attr.is_visible, self.is_visible);
        set(&mut attr.is_editable, self.is_editable);
        set(&mut attr.sequence, self.sequence);
        set(&mut attr.active, self.active);
        if self.updated_by.is_some() {
            attr.updated_by = self.updated_by;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableAttributeFilter {
    #[serde(rename = "_id", default)]
    pub id: Option<ObjectId>,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "nombreColumna", default)]
    pub column_name: Option<String>,
    #[serde(rename = "tipoDato", default)]
    pub data_type: Option<String>,
    #[serde(rename = "esPrimario", default)]
    pub is_primary: Option<bool>,
    #[serde(rename = "esRequerido", default)]
    pub is_required: Option<bool>,
    #[serde(rename = "esBuscable", default)]
    pub is_searchable: Option<bool>,
    #[serde(rename = "esVisible", default)]
    pub is_visible: Option<bool>,
    #[serde(rename = "esEditable", default)]
    pub is_editable: Option<bool>,
    #[serde(rename = "secuencia", default)]
    pub sequence: Option<String>,
    #[serde(rename = "opciones", default)]
    pub options: Option<Vec<String>>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
}

impl Filter<TableAttribute> for TableAttributeFilter {
    fn matches(&self, a: &TableAttribute) -> bool {
        flag_matches(a.active, Some(self.active.unwrap_or(true)))
            && id_matches(Some(&a.id), self.id.as_ref())
            && contains_ci(&a.name, self.name.as_deref())
            && contains_ci(&a.column_name, self.column_name.as_deref())
            && contains_ci(a.data_type.as_str(), self.data_type.as_deref())
            && flag_matches(a.is_primary, self.is_primary)
            && flag_matches(a.is_required, self.is_required)
            && flag_matches(a.is_searchable, self.is_searchable)
            && flag_matches(a.is_visible, self.is_visible)
            && flag_matches(a.is_editable, self.is_editable)
            && contains_ci(&a.sequence, self.sequence.as_deref())
            && intersects(&a.options, self.options.as_deref())
    }
}
