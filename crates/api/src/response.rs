//! Shared response helpers for API handlers.
//!
//! All API responses use the `{ "success": true, "data": ... }` envelope
//! from [`medboard_core::wire`]. Use [`ok`] instead of ad-hoc
//! `serde_json::json!` bodies.

use axum::Json;
use serde::Serialize;

pub use medboard_core::wire::ApiEnvelope;

/// Wrap `data` in a successful envelope.
///
/// # Example
///
/// ```ignore
/// Ok(response::ok(layout))
/// ```
pub fn ok<T: Serialize>(data: T) -> Json<ApiEnvelope<T>> {
    Json(ApiEnvelope::ok(data))
}
