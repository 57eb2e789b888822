//! In-memory storage for dashboard layouts.
//!
//! Every write validates the layout invariants from `medboard_core`
//! (unique codes, spans of at least one cell) before touching the store.
//! Concurrent writers are serialized by a `tokio::sync::RwLock`; the last
//! successful write wins.

use std::collections::BTreeMap;

use chrono::Utc;
use medboard_core::error::CoreError;
use medboard_core::types::{LayoutId, Timestamp};
use medboard_core::wire::CreateLayout;
use medboard_core::{Layout, PlacedWidget};
use serde::Serialize;
use tokio::sync::RwLock;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A stored layout as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredLayout {
    pub id: LayoutId,
    pub name: String,
    pub is_default: bool,
    pub layout: Vec<PlacedWidget>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredLayout {
    pub fn to_layout(&self) -> Layout {
        Layout {
            id: Some(self.id),
            name: self.name.clone(),
            is_default: self.is_default,
            items: self.layout.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Inner {
    next_id: LayoutId,
    layouts: BTreeMap<LayoutId, StoredLayout>,
}

/// Provides data access for dashboard layouts.
#[derive(Default)]
pub struct LayoutRepo {
    inner: RwLock<Inner>,
}

impl LayoutRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new layout.
    ///
    /// When the new layout is the default, every other layout loses its
    /// default flag.
    pub async fn create(&self, dto: &CreateLayout) -> Result<StoredLayout, CoreError> {
        let name = dto.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Layout name must not be empty".to_string()));
        }
        validate_items(&dto.layout)?;

        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;

        if dto.is_default {
            for other in inner.layouts.values_mut() {
                other.is_default = false;
            }
        }

        let now = Utc::now();
        let stored = StoredLayout {
            id,
            name: name.to_string(),
            is_default: dto.is_default,
            layout: dto.layout.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.layouts.insert(id, stored.clone());
        Ok(stored)
    }

    /// All layouts ordered by id.
    pub async fn list(&self) -> Vec<StoredLayout> {
        self.inner.read().await.layouts.values().cloned().collect()
    }

    pub async fn find_by_id(&self, id: LayoutId) -> Option<StoredLayout> {
        self.inner.read().await.layouts.get(&id).cloned()
    }

    /// The layout flagged as default, if any.
    pub async fn find_default(&self) -> Option<StoredLayout> {
        self.inner
            .read()
            .await
            .layouts
            .values()
            .rev()
            .find(|layout| layout.is_default)
            .cloned()
    }

    /// Replace the items of a layout. Returns `None` if `id` is unknown.
    pub async fn update_items(
        &self,
        id: LayoutId,
        items: &[PlacedWidget],
    ) -> Result<Option<StoredLayout>, CoreError> {
        validate_items(items)?;

        let mut inner = self.inner.write().await;
        let Some(stored) = inner.layouts.get_mut(&id) else {
            return Ok(None);
        };
        stored.layout = items.to_vec();
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.layouts.len()
    }
}

fn validate_items(items: &[PlacedWidget]) -> Result<(), CoreError> {
    Layout::empty().with_items(items.to_vec()).validate()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
