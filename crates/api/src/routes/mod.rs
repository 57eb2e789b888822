pub mod dashboard;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dashboard/widgets                    widget catalog (GET)
/// /dashboard/layouts                    list, create (GET, POST)
/// /dashboard/layouts/default            default layout (GET)
/// /dashboard/layouts/{id}               get, replace items (GET, PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/dashboard", dashboard::router())
}
