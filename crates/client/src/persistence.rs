//! Layout persistence policy on top of a [`LayoutStore`].
//!
//! Loading never fails: when no default layout is stored, or the store is
//! unreachable, the built-in starter layout is used and a best-effort
//! create is attempted. Saving patches an already stored layout and
//! creates one otherwise.

use std::sync::Arc;

use medboard_core::wire::CreateLayout;
use medboard_core::Layout;

use crate::error::ClientError;
use crate::store::LayoutStore;

/// Where a loaded layout came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSource {
    /// The stored default layout.
    Stored,
    /// The starter layout, created remotely during this load.
    Created,
    /// The starter layout, kept in memory only because the store failed.
    Fallback,
}

/// Result of [`LayoutPersistence::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedLayout {
    pub layout: Layout,
    pub source: LayoutSource,
}

/// Fetch-default-or-create and patch-or-create on top of a store.
pub struct LayoutPersistence<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for LayoutPersistence<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LayoutStore> LayoutPersistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl<S: LayoutStore + ?Sized> LayoutPersistence<S> {
    pub fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Load the caller's default layout.
    ///
    /// Falls back to [`Layout::starter`] when nothing is stored or the
    /// fetch fails. The starter layout is then created remotely; if that
    /// fails too it is still returned, just without an id.
    pub async fn load(&self) -> LoadedLayout {
        match self.store.fetch_default().await {
            Ok(Some(layout)) => {
                tracing::info!(
                    layout_id = ?layout.id,
                    widgets = layout.len(),
                    "Loaded default dashboard layout"
                );
                return LoadedLayout {
                    layout,
                    source: LayoutSource::Stored,
                };
            }
            Ok(None) => {
                tracing::info!("No default dashboard layout stored, creating starter layout");
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Failed to fetch default dashboard layout, using starter layout"
                );
            }
        }

        // A failed fetch cannot tell "nothing stored" from "unreachable", so
        // the starter is created as the new default either way. On a store
        // that keeps a single default this replaces the previous one.
        let starter = Layout::starter();
        match self.store.create(&CreateLayout::from(&starter)).await {
            Ok(id) => {
                tracing::info!(layout_id = id, "Created starter dashboard layout");
                LoadedLayout {
                    layout: starter.with_id(id),
                    source: LayoutSource::Created,
                }
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Failed to create starter dashboard layout, keeping it in memory only"
                );
                LoadedLayout {
                    layout: starter,
                    source: LayoutSource::Fallback,
                }
            }
        }
    }

    /// Persist `layout` and return it as stored.
    ///
    /// A layout with an id is patched with its items only. A layout without
    /// one is created and the returned value carries the new id.
    pub async fn save(&self, layout: &Layout) -> Result<Layout, ClientError> {
        match layout.id {
            Some(id) => {
                self.store.patch_items(id, &layout.items).await?;
                tracing::info!(layout_id = id, widgets = layout.len(), "Patched dashboard layout");
                Ok(layout.clone())
            }
            None => {
                let id = self.store.create(&CreateLayout::from(layout)).await?;
                tracing::info!(layout_id = id, widgets = layout.len(), "Created dashboard layout");
                Ok(layout.with_id(id))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
