//! Route definitions for the `/entidad` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::entity;
use crate::state::AppState;

/// Routes mounted at `/entidad`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listar", post(entity::list))
        .route("/crear", post(entity::create))
        .route("/actualizar", post(entity::update))
        .route("/eliminar", post(entity::remove))
        .route("/obtener", post(entity::get))
}
