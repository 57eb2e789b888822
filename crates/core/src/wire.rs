//! Wire DTOs shared by the layout-storage service and its HTTP client.
//!
//! Every response is wrapped in a `{ "success": bool, "data": ... }`
//! envelope.

use serde::{Deserialize, Serialize};

use crate::layout::{Layout, PlacedWidget};
use crate::types::LayoutId;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Standard `{ "success": bool, "data": T }` response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable reason when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// A successful response that carries no payload.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /dashboard/layouts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLayout {
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub layout: Vec<PlacedWidget>,
}

impl From<&Layout> for CreateLayout {
    fn from(layout: &Layout) -> Self {
        Self {
            name: layout.name.clone(),
            is_default: layout.is_default,
            layout: layout.items.clone(),
        }
    }
}

/// Body of `PATCH /dashboard/layouts/{id}`: only the items change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchLayout {
    pub layout: Vec<PlacedWidget>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// The part of a create response the client needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedLayout {
    pub id: LayoutId,
}
