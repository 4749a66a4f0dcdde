//! Request body extraction.
//!
//! [`JsonBody`] replaces `axum::Json` so malformed bodies come back in the
//! service's error envelope. An empty body reads as `{}`, and no
//! `Content-Type` header is required.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use parametria_core::listing::{PageRequest, Sorting};
use parametria_core::types::ObjectId;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

pub const MISSING_DATA: &str = "El cuerpo de la solicitud requiere el campo data";

/// JSON body deserialized with `serde_json`, rejecting with [`AppError`].
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        let value = serde_json::from_slice(raw).map_err(|err| {
            AppError::BadRequest(format!("Cuerpo de la solicitud inválido: {err}"))
        })?;
        Ok(JsonBody(value))
    }
}

/// `{ filtros?, paginacion?, sorting? }` body of the `listar` endpoints.
#[derive(Debug, Deserialize)]
pub struct ListRequest<F> {
    #[serde(rename = "filtros")]
    pub filters: Option<F>,
    #[serde(rename = "paginacion")]
    pub pagination: Option<PageRequest>,
    pub sorting: Option<Sorting>,
}

impl<F: Default> ListRequest<F> {
    /// Filters, page and sorting with defaults applied. An absent sorting
    /// stays `None` so the listing falls back to newest first.
    pub fn into_parts(self) -> (F, PageRequest, Option<Sorting>) {
        (
            self.filters.unwrap_or_default(),
            self.pagination.unwrap_or_default(),
            self.sorting,
        )
    }
}

/// `{ data }` body of the mutating and `obtener` endpoints.
#[derive(Debug, Deserialize)]
pub struct DataRequest<T> {
    pub data: Option<T>,
}

impl<T> DataRequest<T> {
    pub fn into_data(self) -> Result<T, AppError> {
        self.data
            .ok_or_else(|| AppError::BadRequest(MISSING_DATA.to_string()))
    }
}

impl<T: Validate> DataRequest<T> {
    /// The `data` payload after its declared field rules passed.
    pub fn into_valid(self) -> Result<T, AppError> {
        let data = self.into_data()?;
        data.validate()?;
        Ok(data)
    }
}

/// `{ id }` reference to a module.
#[derive(Debug, Deserialize)]
pub struct ModuleRef {
    pub id: String,
}

/// `{ _id }` reference to an entity or table attribute.
#[derive(Debug, Deserialize)]
pub struct ItemRef {
    #[serde(rename = "_id")]
    pub id: String,
}

/// An update payload: the target's id (`id` or `_id`) next to the changed
/// fields. Keys the change set does not declare are dropped.
#[derive(Debug, Deserialize)]
pub struct Targeted<T> {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub changes: T,
}

impl<T: Validate> Targeted<T> {
    /// Canonical target id and the validated change set.
    pub fn into_parts(self) -> Result<(ObjectId, T), AppError> {
        let id = parse_id(&self.id)?;
        self.changes.validate()?;
        Ok((id, self.changes))
    }
}

/// Parse a client supplied id into its canonical form.
pub fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    Ok(ObjectId::parse(raw)?)
}

impl ModuleRef {
    pub fn object_id(&self) -> Result<ObjectId, AppError> {
        parse_id(&self.id)
    }
}

impl ItemRef {
    pub fn object_id(&self) -> Result<ObjectId, AppError> {
        parse_id(&self.id)
    }
}
