use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/enums`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_all))
        .route("/{tipo}", get(catalog::get_one))
}
