//! Query parameters shared by several handler modules.
//!
//! Every parameter is optional at the extractor level so a missing one is
//! reported as `El QueryParam {name} es requerido` instead of a bare
//! extractor rejection.

use parametria_core::types::ObjectId;
use serde::Deserialize;

use crate::error::AppError;
use crate::extract::parse_id;

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("El QueryParam {name} es requerido")))
}

/// `?idModulo=`
#[derive(Debug, Deserialize)]
pub struct ModuleParam {
    #[serde(rename = "idModulo")]
    pub module_id: Option<String>,
}

impl ModuleParam {
    pub fn require(&self) -> Result<ObjectId, AppError> {
        parse_id(required(self.module_id.as_deref(), "idModulo")?)
    }
}

/// `?idEntidad=`
#[derive(Debug, Deserialize)]
pub struct EntityParam {
    #[serde(rename = "idEntidad")]
    pub entity_id: Option<String>,
}

impl EntityParam {
    pub fn require(&self) -> Result<ObjectId, AppError> {
        parse_id(required(self.entity_id.as_deref(), "idEntidad")?)
    }
}

/// `?endPoint=`
#[derive(Debug, Deserialize)]
pub struct EndpointParam {
    #[serde(rename = "endPoint")]
    pub endpoint: Option<String>,
}

impl EndpointParam {
    pub fn require(&self) -> Result<&str, AppError> {
        required(self.endpoint.as_deref(), "endPoint")
    }
}
