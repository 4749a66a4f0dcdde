use axum::routing::post;
use axum::Router;

use crate::handlers::attribute;
use crate::state::AppState;

/// Routes mounted at `/atributo-tabla`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listar", post(attribute::list))
        .route("/crear", post(attribute::create))
        .route("/actualizar", post(attribute::update))
        .route("/eliminar", post(attribute::remove))
}
