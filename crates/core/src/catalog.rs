//! Closed value sets used by the configuration model.
//!
//! The wire spelling of every variant is part of the public contract: it is
//! what downstream services store and what the `/enums` endpoints publish.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of database a module's downstream tables live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionKind {
    #[serde(rename = "MONGODB")]
    MongoDb,
    #[serde(rename = "POSTGRES")]
    Postgres,
    #[serde(rename = "ORACLE")]
    Oracle,
}

impl ConnectionKind {
    pub const ALL: [Self; 3] = [Self::MongoDb, Self::Postgres, Self::Oracle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MongoDb => "MONGODB",
            Self::Postgres => "POSTGRES",
            Self::Oracle => "ORACLE",
        }
    }
}

/// Column data type of a table attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Integer,
    Decimal,
    Boolean,
    Date,
    Datetime,
    Enum,
    Json,
}

impl DataType {
    pub const ALL: [Self; 9] = [
        Self::String,
        Self::Number,
        Self::Integer,
        Self::Decimal,
        Self::Boolean,
        Self::Date,
        Self::Datetime,
        Self::Enum,
        Self::Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Enum => "enum",
            Self::Json => "json",
        }
    }
}

/// CRUD operation an entity may expose through the template API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    GetOne,
    GetMany,
    Create,
    Update,
    Patch,
    Delete,
}

impl OperationKind {
    pub const ALL: [Self; 6] = [
        Self::GetOne,
        Self::GetMany,
        Self::Create,
        Self::Update,
        Self::Patch,
        Self::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetOne => "GET_ONE",
            Self::GetMany => "GET_MANY",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Operations addressing a single existing record.
    pub fn requires_id(&self) -> bool {
        matches!(self, Self::GetOne | Self::Update | Self::Patch | Self::Delete)
    }

    /// Operations carrying a record body.
    pub fn requires_data(&self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Patch)
    }
}

/// Catalog names accepted by [`catalog_entry`].
pub const CATALOG_NAMES: [&str; 3] = ["tipoConexion", "tipoDato", "tipoOperacion"];

/// Every catalog at once, as published by `GET /enums`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumCatalog {
    pub tipo_conexion: Vec<&'static str>,
    pub tipo_dato: Vec<&'static str>,
    pub tipo_operacion: Vec<&'static str>,
}

pub fn catalog() -> EnumCatalog {
    EnumCatalog {
        tipo_conexion: ConnectionKind::ALL.iter().map(|k| k.as_str()).collect(),
        tipo_dato: DataType::ALL.iter().map(|t| t.as_str()).collect(),
        tipo_operacion: OperationKind::ALL.iter().map(|o| o.as_str()).collect(),
    }
}

/// Values of a single catalog, looked up by its wire name.
pub fn catalog_entry(name: &str) -> Result<Vec<&'static str>, CoreError> {
    let all = catalog();
    match name {
        "tipoConexion" => Ok(all.tipo_conexion),
        "tipoDato" => Ok(all.tipo_dato),
        "tipoOperacion" => Ok(all.tipo_operacion),
        other => Err(CoreError::Validation(format!(
            "Enum {other} no encontrado los disponibles son: {}",
            CATALOG_NAMES.join(", ")
        ))),
    }
}
