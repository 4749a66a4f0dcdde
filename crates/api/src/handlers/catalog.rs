//! Handlers for `/enums`.

use axum::extract::Path;
use parametria_core::catalog::{catalog, catalog_entry};
use parametria_core::lookup::Lookup;

use crate::error::AppResult;
use crate::response::Reply;

/// GET /enums
pub async fn list_all() -> AppResult<Reply> {
    Reply::ok(&Lookup::Found(catalog()))
}

/// GET /enums/{tipo}
pub async fn get_one(Path(name): Path<String>) -> AppResult<Reply> {
    let values = catalog_entry(&name)?;
    Reply::ok(&Lookup::Found(values))
}
