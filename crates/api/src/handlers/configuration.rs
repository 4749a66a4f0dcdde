//! Read-only configuration views consumed by the services that render the
//! configured tables.

use axum::extract::{Query, State};
use parametria_db::repositories::ConfigurationRepo;

use crate::error::AppResult;
use crate::query::{EntityParam, ModuleParam};
use crate::response::Reply;
use crate::state::AppState;

/// GET /configuracion/obtener?idEntidad=
///
/// The owning module with only the requested entity left in `entidades`.
pub async fn for_entity(
    State(state): State<AppState>,
    Query(params): Query<EntityParam>,
) -> AppResult<Reply> {
    let entity_id = params.require()?;
    let result = ConfigurationRepo::for_entity(state.store.as_ref(), entity_id).await?;
    Reply::ok(&result)
}

/// GET /configuracion/obtenerPorModulo?idModulo=
pub async fn for_module(
    State(state): State<AppState>,
    Query(params): Query<ModuleParam>,
) -> AppResult<Reply> {
    let module_id = params.require()?;
    let result = ConfigurationRepo::for_module(state.store.as_ref(), module_id).await?;
    Reply::ok(&result)
}
