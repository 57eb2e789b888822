//! Ephemeral state of one dashboard page.

use medboard_core::{Layout, WidgetCatalog};

/// Whether the dashboard is being edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    View,
    Edit,
}

/// The widget catalog as last fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loaded(WidgetCatalog),
    /// The fetch failed. Nothing counts as available, so every placed item
    /// renders as a placeholder.
    Unavailable,
}

impl CatalogState {
    pub fn catalog(&self) -> Option<&WidgetCatalog> {
        match self {
            Self::Loaded(catalog) => Some(catalog),
            Self::Unavailable => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Snapshot handed out by
/// [`DashboardController::begin_save`](crate::DashboardController::begin_save).
///
/// Must be given back to `finish_save` together with the storage result.
#[derive(Debug)]
pub struct PendingSave {
    pub(crate) layout: Layout,
}

impl PendingSave {
    /// The layout being written.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}

/// Editing session of a mounted dashboard.
///
/// `dirty` is not stored: it is the difference between the in-memory
/// layout and the last persisted one.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    pub(crate) layout: Layout,
    pub(crate) persisted: Layout,
    pub(crate) mode: Mode,
    pub(crate) period: String,
    pub(crate) catalog: CatalogState,
    pub(crate) save_in_flight: bool,
}

impl DashboardSession {
    /// A clean session in view mode around a freshly loaded layout.
    pub fn new(layout: Layout, catalog: CatalogState, period: impl Into<String>) -> Self {
        Self {
            persisted: layout.clone(),
            layout,
            mode: Mode::View,
            period: period.into(),
            catalog,
            save_in_flight: false,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The layout as last loaded or saved.
    pub fn persisted(&self) -> &Layout {
        &self.persisted
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Edit
    }

    pub fn is_dirty(&self) -> bool {
        self.layout != self.persisted
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn is_save_in_flight(&self) -> bool {
        self.save_in_flight
    }
}

#[cfg(test)]
mod tests {
    use medboard_core::PlacedWidget;

    use super::*;

    #[test]
    fn new_session_is_clean_and_viewing() {
        let session = DashboardSession::new(Layout::starter(), CatalogState::Unavailable, "month");
        assert_eq!(session.mode(), Mode::View);
        assert!(!session.is_dirty());
        assert!(!session.is_save_in_flight());
        assert!(session.catalog().catalog().is_none());
    }

    #[test]
    fn dirty_tracks_difference_from_persisted() {
        let mut session = DashboardSession::new(Layout::empty(), CatalogState::Unavailable, "month");
        let original = session.layout.clone();

        session.layout = original.with_items(vec![PlacedWidget::new("fin", 0, 0, 2, 2)]);
        assert!(session.is_dirty());

        session.layout = original;
        assert!(!session.is_dirty());
    }
}
