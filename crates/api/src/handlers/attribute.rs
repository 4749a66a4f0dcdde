//! Handlers for the `/atributo-tabla` resource, scoped by `?idEntidad=`.

use axum::extract::{Query, State};
use parametria_db::models::{CreateTableAttribute, TableAttributeFilter, UpdateTableAttribute};
use parametria_db::repositories::AttributeRepo;

use crate::error::AppResult;
use crate::extract::{DataRequest, ItemRef, JsonBody, ListRequest, Targeted};
use crate::query::EntityParam;
use crate::response::Reply;
use crate::state::AppState;

/// POST /atributo-tabla/listar?idEntidad=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<EntityParam>,
    JsonBody(body): JsonBody<ListRequest<TableAttributeFilter>>,
) -> AppResult<Reply> {
    let entity_id = params.require()?;
    let (filter, page, sorting) = body.into_parts();
    let result =
        AttributeRepo::list(state.store.as_ref(), entity_id, &filter, sorting.as_ref(), page)
            .await?;
    Reply::page(result)
}

/// POST /atributo-tabla/crear?idEntidad=
pub async fn create(
    State(state): State<AppState>,
    Query(params): Query<EntityParam>,
    JsonBody(body): JsonBody<DataRequest<CreateTableAttribute>>,
) -> AppResult<Reply> {
    let entity_id = params.require()?;
    let input = body.into_valid()?;
    let result = AttributeRepo::create(state.store.as_ref(), entity_id, input).await?;
    Reply::created(&result)
}

/// POST /atributo-tabla/actualizar?idEntidad=
pub async fn update(
    State(state): State<AppState>,
    Query(params): Query<EntityParam>,
    JsonBody(body): JsonBody<DataRequest<Targeted<UpdateTableAttribute>>>,
) -> AppResult<Reply> {
    let entity_id = params.require()?;
    let (attribute_id, changes) = body.into_data()?.into_parts()?;
    let result =
        AttributeRepo::update(state.store.as_ref(), entity_id, attribute_id, changes).await?;
    Reply::ok(&result)
}

/// POST /atributo-tabla/eliminar?idEntidad=
pub async fn remove(
    State(state): State<AppState>,
    Query(params): Query<EntityParam>,
    JsonBody(body): JsonBody<DataRequest<ItemRef>>,
) -> AppResult<Reply> {
    let entity_id = params.require()?;
    let attribute_id = body.into_data()?.object_id()?;
    let result = AttributeRepo::remove(state.store.as_ref(), entity_id, attribute_id).await?;
    Reply::ok(&result)
}
