//! Handlers for the `/entidad` resource. Entities live inside a module, so
//! listing, creation and updates are scoped by `?idModulo=`.

use axum::extract::{Query, State};
use parametria_db::models::{CreateEntity, EntityFilter, UpdateEntity};
use parametria_db::repositories::EntityRepo;

use crate::error::AppResult;
use crate::extract::{DataRequest, ItemRef, JsonBody, ListRequest, Targeted};
use crate::query::ModuleParam;
use crate::response::Reply;
use crate::state::AppState;

/// POST /entidad/listar?idModulo=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ModuleParam>,
    JsonBody(body): JsonBody<ListRequest<EntityFilter>>,
) -> AppResult<Reply> {
    let module_id = params.require()?;
    let (filter, page, sorting) = body.into_parts();
    let result =
        EntityRepo::list(state.store.as_ref(), module_id, &filter, sorting.as_ref(), page).await?;
    Reply::page(result)
}

/// POST /entidad/crear?idModulo=
pub async fn create(
    State(state): State<AppState>,
    Query(params): Query<ModuleParam>,
    JsonBody(body): JsonBody<DataRequest<CreateEntity>>,
) -> AppResult<Reply> {
    let module_id = params.require()?;
    let input = body.into_valid()?;
    let result = EntityRepo::create(state.store.as_ref(), module_id, input).await?;
    Reply::created(&result)
}

/// POST /entidad/actualizar?idModulo=
pub async fn update(
    State(state): State<AppState>,
    Query(params): Query<ModuleParam>,
    JsonBody(body): JsonBody<DataRequest<Targeted<UpdateEntity>>>,
) -> AppResult<Reply> {
    let module_id = params.require()?;
    let (entity_id, changes) = body.into_data()?.into_parts()?;
    let result = EntityRepo::update(state.store.as_ref(), module_id, entity_id, changes).await?;
    Reply::ok(&result)
}

/// POST /entidad/eliminar
pub async fn remove(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DataRequest<ItemRef>>,
) -> AppResult<Reply> {
    let entity_id = body.into_data()?.object_id()?;
    let result = EntityRepo::remove(state.store.as_ref(), entity_id).await?;
    Reply::ok(&result)
}

/// POST /entidad/obtener
pub async fn get(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DataRequest<ItemRef>>,
) -> AppResult<Reply> {
    let entity_id = body.into_data()?.object_id()?;
    let result = EntityRepo::get(state.store.as_ref(), entity_id).await?;
    Reply::ok(&result)
}
