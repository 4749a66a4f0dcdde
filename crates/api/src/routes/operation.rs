use axum::routing::{get, post};
use axum::Router;

use crate::handlers::operation;
use crate::state::AppState;

/// Routes mounted at `/orquestador`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ejecutar", post(operation::execute))
        .route("/health", get(operation::health))
}
