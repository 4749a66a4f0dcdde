//! Route definitions for the `/modulo` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::module;
use crate::state::AppState;

/// Routes mounted at `/modulo`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listar", post(module::list))
        .route("/crear", post(module::create))
        .route("/actualizar", post(module::update))
        .route("/eliminar", post(module::remove))
        .route("/obtener", post(module::get))
}
