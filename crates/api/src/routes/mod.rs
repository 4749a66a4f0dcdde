pub mod attribute;
pub mod catalog;
pub mod configuration;
pub mod entity;
pub mod health;
pub mod module;
pub mod operation;

use axum::Router;

use crate::state::AppState;

/// Prefix every API route is mounted under.
pub const API_PREFIX: &str = "/service/pendig/transversales/conf-parametria/api/v1";

/// Build the route tree mounted at [`API_PREFIX`].
///
/// ```text
/// /modulo/{listar,crear,actualizar,eliminar,obtener}          POST
/// /entidad/{listar,crear,actualizar}?idModulo=                 POST
/// /entidad/{eliminar,obtener}                                  POST
/// /atributo-tabla/{listar,crear,actualizar,eliminar}?idEntidad= POST
/// /configuracion/obtener?idEntidad=                            GET
/// /configuracion/obtenerPorModulo?idModulo=                    GET
/// /orquestador/ejecutar                                        POST
/// /orquestador/health?endPoint=                                GET
/// /enums, /enums/{tipo}                                        GET
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/modulo", module::router())
        .nest("/entidad", entity::router())
        .nest("/atributo-tabla", attribute::router())
        .nest("/configuracion", configuration::router())
        .nest("/orquestador", operation::router())
        .nest("/enums", catalog::router())
}
