//! Handlers for the dashboard widget catalog and layout storage.
//!
//! Responses use the `{success, data}` envelope. Layout items are validated
//! against the core invariants before they are stored.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use medboard_core::error::CoreError;
use medboard_core::types::LayoutId;
use medboard_core::wire::{CreateLayout, PatchLayout};

use crate::error::{AppError, AppResult};
use crate::response;
use crate::state::AppState;

fn layout_not_found(id: LayoutId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "DashboardLayout",
        id,
    })
}

// ---------------------------------------------------------------------------
// Widget catalog
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/widgets
///
/// The widget catalog grouped by module, in module order.
pub async fn list_widgets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(response::ok(state.catalog.as_ref().clone()))
}

// ---------------------------------------------------------------------------
// Layouts
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/layouts
///
/// List every stored layout.
pub async fn list_layouts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(response::ok(state.layouts.list().await))
}

/// GET /api/v1/dashboard/layouts/default
///
/// The default layout, or `data: null` when none has been stored yet.
pub async fn get_default_layout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let layout = state.layouts.find_default().await;
    Ok(response::ok(layout))
}

/// POST /api/v1/dashboard/layouts
///
/// Store a new layout.
pub async fn create_layout(
    State(state): State<AppState>,
    Json(input): Json<CreateLayout>,
) -> AppResult<impl IntoResponse> {
    let layout = state.layouts.create(&input).await?;

    tracing::info!(
        layout_id = layout.id,
        layout_name = %layout.name,
        is_default = layout.is_default,
        widgets = layout.layout.len(),
        "Dashboard layout created",
    );

    Ok((StatusCode::CREATED, response::ok(layout)))
}

/// GET /api/v1/dashboard/layouts/{id}
///
/// Retrieve a single layout by ID.
pub async fn get_layout(
    State(state): State<AppState>,
    Path(layout_id): Path<LayoutId>,
) -> AppResult<impl IntoResponse> {
    let layout = state
        .layouts
        .find_by_id(layout_id)
        .await
        .ok_or_else(|| layout_not_found(layout_id))?;

    Ok(response::ok(layout))
}

/// PATCH /api/v1/dashboard/layouts/{id}
///
/// Replace the widget items of a layout.
pub async fn patch_layout(
    State(state): State<AppState>,
    Path(layout_id): Path<LayoutId>,
    Json(input): Json<PatchLayout>,
) -> AppResult<impl IntoResponse> {
    let layout = state
        .layouts
        .update_items(layout_id, &input.layout)
        .await?
        .ok_or_else(|| layout_not_found(layout_id))?;

    tracing::info!(
        layout_id,
        widgets = layout.layout.len(),
        "Dashboard layout updated",
    );

    Ok(response::ok(layout))
}
