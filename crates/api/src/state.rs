use std::sync::Arc;

use parametria_db::store::ModuleStore;
use parametria_template::TemplateClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Module document store (PostgreSQL or in-memory).
    pub store: Arc<dyn ModuleStore>,
    /// Client for the template API.
    pub template: Arc<TemplateClient>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn ModuleStore>, template: TemplateClient, config: ServerConfig) -> Self {
        Self {
            store,
            template: Arc::new(template),
            config: Arc::new(config),
        }
    }
}
