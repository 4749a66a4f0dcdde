//! Handlers for the `/modulo` resource.

use axum::extract::State;
use parametria_core::lookup::Lookup;
use parametria_db::models::{CreateModule, ModuleFilter, UpdateModule};
use parametria_db::repositories::ModuleRepo;

use crate::error::AppResult;
use crate::extract::{DataRequest, JsonBody, ListRequest, ModuleRef, Targeted};
use crate::response::Reply;
use crate::state::AppState;

/// POST /modulo/listar
pub async fn list(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ListRequest<ModuleFilter>>,
) -> AppResult<Reply> {
    let (filter, page, sorting) = body.into_parts();
    let result = ModuleRepo::list(state.store.as_ref(), &filter, sorting.as_ref(), page).await?;
    Reply::page(Lookup::Found(result))
}

/// POST /modulo/crear
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DataRequest<CreateModule>>,
) -> AppResult<Reply> {
    let input = body.into_valid()?;
    let module = ModuleRepo::create(state.store.as_ref(), input).await?;
    Reply::created(&Lookup::Found(module))
}

/// POST /modulo/actualizar
pub async fn update(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DataRequest<Targeted<UpdateModule>>>,
) -> AppResult<Reply> {
    let (id, changes) = body.into_data()?.into_parts()?;
    let result = ModuleRepo::update(state.store.as_ref(), id, changes).await?;
    Reply::ok(&result)
}

/// POST /modulo/eliminar
pub async fn remove(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DataRequest<ModuleRef>>,
) -> AppResult<Reply> {
    let id = body.into_data()?.object_id()?;
    let result = ModuleRepo::remove(state.store.as_ref(), id).await?;
    Reply::ok(&result)
}

/// POST /modulo/obtener
pub async fn get(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DataRequest<ModuleRef>>,
) -> AppResult<Reply> {
    let id = body.into_data()?.object_id()?;
    let result = ModuleRepo::get(state.store.as_ref(), id).await?;
    Reply::ok(&result)
}
