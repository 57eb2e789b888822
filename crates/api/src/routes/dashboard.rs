//! Route definitions for the dashboard catalog and layouts.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes mounted at `/dashboard`.
///
/// ```text
/// GET    /widgets           -> list_widgets
/// GET    /layouts           -> list_layouts
/// POST   /layouts           -> create_layout
/// GET    /layouts/default   -> get_default_layout
/// GET    /layouts/{id}      -> get_layout
/// PATCH  /layouts/{id}      -> patch_layout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/widgets", get(dashboard::list_widgets))
        .route(
            "/layouts",
            get(dashboard::list_layouts).post(dashboard::create_layout),
        )
        .route("/layouts/default", get(dashboard::get_default_layout))
        .route(
            "/layouts/{id}",
            get(dashboard::get_layout).patch(dashboard::patch_layout),
        )
}
