use axum::routing::get;
use axum::Router;

use crate::handlers::configuration;
use crate::state::AppState;

/// Routes mounted at `/configuracion`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/obtener", get(configuration::for_entity))
        .route("/obtenerPorModulo", get(configuration::for_module))
}
