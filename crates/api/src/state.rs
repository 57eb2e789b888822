use std::sync::Arc;

use medboard_core::WidgetCatalog;

use crate::config::ServerConfig;
use crate::repo::LayoutRepo;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Widget catalog served to every caller.
    pub catalog: Arc<WidgetCatalog>,
    /// In-memory layout storage.
    pub layouts: Arc<LayoutRepo>,
}

impl AppState {
    pub fn new(config: ServerConfig, catalog: WidgetCatalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            layouts: Arc::new(LayoutRepo::new()),
        }
    }
}
