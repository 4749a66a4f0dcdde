#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use parametria_api::config::ServerConfig;
use parametria_api::router::build_app_router;
use parametria_api::routes::API_PREFIX;
use parametria_api::state::AppState;
use parametria_db::store::MemoryModuleStore;
use parametria_template::TemplateClient;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router over `store`, with the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<MemoryModuleStore>) -> Router {
    let template = TemplateClient::new(Duration::from_secs(2)).unwrap();
    build_app_router(AppState::new(store, template, test_config()))
}

/// A router over a fresh, empty store.
pub fn test_app() -> Router {
    build_test_app(Arc::new(MemoryModuleStore::new()))
}

/// Prefix `path` with the API mount point.
pub fn api(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding through the HTTP surface
// ---------------------------------------------------------------------------

pub async fn create_module(app: &Router, name: &str) -> String {
    let response = post_json(
        app.clone(),
        &api("/modulo/crear"),
        json!({"data": {
            "nombre": name,
            "descripcion": format!("Módulo {name}"),
            "tipoConexion": "POSTGRES",
            "database": "db_comercial",
            "apiEndpoint": "http://template.local",
            "usuarioCreacion": "ana"
        }}),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["response"]["_id"].as_str().unwrap().to_string()
}

pub async fn create_entity(app: &Router, module_id: &str, name: &str) -> String {
    let response = post_json(
        app.clone(),
        &api(&format!("/entidad/crear?idModulo={module_id}")),
        json!({"data": {
            "nombre": name,
            "nombreTabla": format!("tb_{}", name.to_lowercase()),
            "operaciones": ["GET_MANY", "CREATE"],
            "usuarioCreacion": "ana"
        }}),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["response"]["_id"].as_str().unwrap().to_string()
}

pub async fn create_attribute(app: &Router, entity_id: &str, name: &str) -> String {
    let response = post_json(
        app.clone(),
        &api(&format!("/atributo-tabla/crear?idEntidad={entity_id}")),
        json!({"data": {
            "nombre": name,
            "nombreColumna": name,
            "tipoDato": "string",
            "usuarioCreacion": "ana"
        }}),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["response"]["_id"].as_str().unwrap().to_string()
}
