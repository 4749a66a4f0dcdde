//! Handlers for `/orquestador`: forwarding CRUD operations to a template
//! API and probing its availability.

use axum::extract::{Query, State};
use parametria_core::operation::DynamicOperation;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::query::EndpointParam;
use crate::response::Reply;
use crate::state::AppState;

/// POST /orquestador/ejecutar
///
/// The template API's outcome is always answered as an envelope; its
/// `statusCode` becomes the HTTP status.
pub async fn execute(
    State(state): State<AppState>,
    JsonBody(operation): JsonBody<DynamicOperation>,
) -> Reply {
    tracing::info!(
        kind = operation.kind.as_str(),
        table = %operation.entity_definition.table_name,
        "Forwarding operation to template API"
    );
    Reply::passthrough(state.template.execute(&operation).await)
}

/// GET /orquestador/health?endPoint=
pub async fn health(
    State(state): State<AppState>,
    Query(params): Query<EndpointParam>,
) -> AppResult<Reply> {
    let endpoint = params.require()?;
    Ok(Reply::passthrough(state.template.check_health(endpoint).await))
}
