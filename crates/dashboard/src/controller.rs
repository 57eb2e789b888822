//! The dashboard controller: one mounted dashboard page.
//!
//! The controller owns a [`DashboardSession`] and drives it through the
//! View/Edit state machine:
//!
//! ```text
//!            enter_edit / ActivateEditMode / add_widget / add_all_available
//!   View ──────────────────────────────────────────────────────────────▶ Edit
//!    ▲                                                                   │
//!    └──── preview (keeps edits) / save (on success) / discard ──────────┘
//!          leave_edit (asks first when dirty)
//! ```
//!
//! Every edit replaces the session layout with a new [`Layout`] value.

use std::sync::Arc;

use medboard_client::{CatalogSource, ClientError, LayoutPersistence, LayoutStore};
use medboard_core::grid::{self, clamp_to_grid};
use medboard_core::library::{self, Category, LibraryEntry, LibraryQuery};
use medboard_core::visibility;
use medboard_core::{DashboardSettings, GridRect, Layout, PlacedWidget};
use medboard_events::{DashboardSignal, SignalBus, SignalEvent};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;

use crate::confirm::{ConfirmPrompt, Confirmer};
use crate::error::DashboardError;
use crate::outcome::{AddOutcome, BulkAddOutcome, LeaveEditOutcome};
use crate::render::{self, RenderSlot, WidgetResolver};
use crate::session::{CatalogState, DashboardSession, Mode, PendingSave};

/// Controller of one mounted dashboard.
pub struct DashboardController<S, C> {
    persistence: LayoutPersistence<S>,
    catalog_source: Arc<C>,
    confirmer: Arc<dyn Confirmer>,
    bus: Arc<SignalBus>,
    settings: DashboardSettings,
    session: DashboardSession,
}

impl<S, C> DashboardController<S, C>
where
    S: LayoutStore,
    C: CatalogSource,
{
    // -----------------------------------------------------------------------
    // Mount
    // -----------------------------------------------------------------------

    /// Load the catalog and the default layout and start a clean session in
    /// view mode.
    ///
    /// Never fails: an unreachable catalog leaves the session with
    /// [`CatalogState::Unavailable`], and layout loading falls back to the
    /// starter layout.
    pub async fn mount(
        store: Arc<S>,
        catalog_source: Arc<C>,
        confirmer: Arc<dyn Confirmer>,
        bus: Arc<SignalBus>,
        settings: DashboardSettings,
    ) -> Self {
        let persistence = LayoutPersistence::from_arc(store);
        let catalog = fetch_catalog_state(catalog_source.as_ref()).await;
        let loaded = persistence.load().await;

        let session = DashboardSession::new(loaded.layout, catalog, settings.default_period.clone());
        let controller = Self {
            persistence,
            catalog_source,
            confirmer,
            bus,
            settings,
            session,
        };

        tracing::info!(
            layout_id = ?controller.session.layout.id,
            source = ?loaded.source,
            placed = controller.session.layout.len(),
            visible = controller.visible_count(),
            catalog_loaded = controller.session.catalog.is_loaded(),
            "Dashboard mounted"
        );
        controller
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn layout(&self) -> &Layout {
        &self.session.layout
    }

    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    pub fn period(&self) -> &str {
        &self.session.period
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.session.catalog
    }

    // -----------------------------------------------------------------------
    // Mode transitions
    // -----------------------------------------------------------------------

    pub fn enter_edit(&mut self) {
        if self.session.mode != Mode::Edit {
            tracing::debug!("Entering dashboard edit mode");
            self.session.mode = Mode::Edit;
        }
    }

    /// Leave edit mode keeping the unsaved layout on screen.
    pub fn preview(&mut self) {
        self.session.mode = Mode::View;
    }

    /// Leave edit mode without saving.
    ///
    /// Clean sessions just switch to view mode. Dirty sessions ask the
    /// confirmer first and discard the changes if the user agrees.
    pub async fn leave_edit(&mut self) -> LeaveEditOutcome {
        if !self.session.is_dirty() {
            self.session.mode = Mode::View;
            return LeaveEditOutcome::Left;
        }

        if self.confirmer.confirm(&ConfirmPrompt::DiscardChanges).await {
            self.discard();
            LeaveEditOutcome::Discarded
        } else {
            LeaveEditOutcome::Stayed
        }
    }

    /// Whether the host may navigate away. Asks the confirmer when there are
    /// unsaved changes.
    pub async fn confirm_navigation(&self) -> bool {
        if !self.session.is_dirty() {
            return true;
        }
        self.confirmer
            .confirm(&ConfirmPrompt::LeaveWithUnsavedChanges)
            .await
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Place the widget `code` below the current content.
    ///
    /// Enters edit mode when the widget is added.
    pub fn add_widget(&mut self, code: &str) -> Result<AddOutcome, DashboardError> {
        let Some(definition) = self
            .session
            .catalog
            .catalog()
            .and_then(|catalog| catalog.find(code))
        else {
            tracing::debug!(code, "Widget is not in the available catalog");
            return Ok(AddOutcome::Unavailable);
        };

        if self.session.layout.contains(code) {
            return Ok(AddOutcome::AlreadyAdded);
        }

        let placed = grid::place_single(&self.session.layout, definition, self.settings.grid_cols);
        let next = self.session.layout.with_appended([placed.clone()])?;

        tracing::info!(
            code,
            x = placed.x,
            y = placed.y,
            w = placed.w,
            h = placed.h,
            "Widget added to dashboard"
        );
        self.replace_layout(next);
        self.enter_edit();
        Ok(AddOutcome::Added(placed))
    }

    /// Place every available widget that is not on the layout yet.
    ///
    /// Widgets are packed in catalog order. Above the configured threshold
    /// the confirmer is asked first.
    pub async fn add_all_available(&mut self) -> Result<BulkAddOutcome, DashboardError> {
        let Some(catalog) = self.session.catalog.catalog() else {
            return Ok(BulkAddOutcome::NothingToAdd);
        };

        let missing = visibility::missing_widgets(&self.session.layout, catalog);
        if missing.is_empty() {
            return Ok(BulkAddOutcome::NothingToAdd);
        }

        let count = missing.len();
        if count > self.settings.bulk_add_confirm_threshold
            && !self
                .confirmer
                .confirm(&ConfirmPrompt::AddAllWidgets { count })
                .await
        {
            tracing::debug!(count, "Bulk widget add cancelled");
            return Ok(BulkAddOutcome::Cancelled);
        }

        let placed = grid::place_batch(
            &self.session.layout,
            missing.iter().copied(),
            self.settings.grid_cols,
        );
        let next = self.session.layout.with_appended(placed.clone())?;

        tracing::info!(count, "Added all available widgets to dashboard");
        self.replace_layout(next);
        self.enter_edit();
        Ok(BulkAddOutcome::Added(placed))
    }

    /// Remove the widget `code`. Remaining items keep their positions.
    ///
    /// Returns `false` when the widget was not placed.
    pub fn remove_widget(&mut self, code: &str) -> bool {
        if !self.session.layout.contains(code) {
            return false;
        }
        let next = self.session.layout.without(code);
        self.replace_layout(next);
        tracing::info!(code, "Widget removed from dashboard");
        true
    }

    /// Apply a drag or resize. The rectangle is clamped to the grid.
    pub fn move_or_resize(
        &mut self,
        code: &str,
        rect: GridRect,
    ) -> Result<PlacedWidget, DashboardError> {
        if !self.session.is_editing() {
            return Err(DashboardError::NotEditing);
        }

        let rect = clamp_to_grid(rect, self.settings.grid_cols);
        let next = self
            .session
            .layout
            .with_geometry(code, rect)
            .ok_or_else(|| DashboardError::NotPlaced(code.to_string()))?;

        let placed = PlacedWidget::new(code, rect.x, rect.y, rect.w, rect.h);
        self.replace_layout(next);
        Ok(placed)
    }

    /// Close vertical gaps, keeping reading order.
    pub fn compact_layout(&mut self) -> Result<(), DashboardError> {
        if !self.session.is_editing() {
            return Err(DashboardError::NotEditing);
        }
        let items = grid::compact(&self.session.layout.items);
        let next = self.session.layout.with_items(items);
        self.replace_layout(next);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Save / discard
    // -----------------------------------------------------------------------

    /// Start a save of the current layout.
    ///
    /// Only one save may be in flight; the returned snapshot must be handed
    /// back to [`finish_save`](Self::finish_save).
    pub fn begin_save(&mut self) -> Result<PendingSave, DashboardError> {
        if self.session.save_in_flight {
            return Err(DashboardError::SaveInProgress);
        }
        self.session.save_in_flight = true;
        Ok(PendingSave {
            layout: self.session.layout.clone(),
        })
    }

    /// Complete a save started with [`begin_save`](Self::begin_save).
    ///
    /// On success the saved layout becomes the persisted snapshot. If the
    /// layout was not edited meanwhile the session turns clean and leaves
    /// edit mode; otherwise the newer edits stay dirty. On failure nothing
    /// changes except that another save may start.
    pub fn finish_save(
        &mut self,
        pending: PendingSave,
        result: Result<Layout, ClientError>,
    ) -> Result<Layout, DashboardError> {
        self.session.save_in_flight = false;

        let saved = match result {
            Ok(saved) => saved,
            Err(err) => {
                tracing::warn!(
                    layout_id = ?pending.layout.id,
                    error = %err,
                    "Dashboard save failed, keeping unsaved changes"
                );
                return Err(DashboardError::Save(err));
            }
        };

        if self.session.layout.items == pending.layout.items {
            self.session.layout = saved.clone();
            self.session.mode = Mode::View;
        } else {
            tracing::debug!("Dashboard edited while saving, staying dirty");
            self.session.layout = Layout {
                id: saved.id,
                ..self.session.layout.clone()
            };
        }
        self.session.persisted = saved.clone();

        tracing::info!(layout_id = ?saved.id, widgets = saved.len(), "Dashboard layout saved");
        Ok(saved)
    }

    /// Persist the current layout and, on success, return to view mode.
    pub async fn save(&mut self) -> Result<Layout, DashboardError> {
        let pending = self.begin_save()?;
        let result = self.persistence.save(pending.layout()).await;
        self.finish_save(pending, result)
    }

    /// Restore the last persisted layout and return to view mode.
    pub fn discard(&mut self) {
        if self.session.is_dirty() {
            tracing::info!("Discarding unsaved dashboard changes");
        }
        self.session.layout = self.session.persisted.clone();
        self.session.mode = Mode::View;
    }

    // -----------------------------------------------------------------------
    // Catalog / period / signals
    // -----------------------------------------------------------------------

    /// Fetch the catalog again. Items of re-enabled modules become visible
    /// at their stored positions.
    ///
    /// Returns whether the catalog is now loaded.
    pub async fn reload_catalog(&mut self) -> bool {
        self.session.catalog = fetch_catalog_state(self.catalog_source.as_ref()).await;
        tracing::debug!(
            catalog_loaded = self.session.catalog.is_loaded(),
            visible = self.visible_count(),
            "Dashboard catalog reloaded"
        );
        self.session.catalog.is_loaded()
    }

    /// Change the reporting period. Other components are notified only when
    /// the value actually changes.
    pub fn set_period(&mut self, period: impl Into<String>) {
        let period = period.into();
        if period == self.session.period {
            return;
        }
        self.session.period = period.clone();
        self.bus.publish(DashboardSignal::PeriodChanged { period });
    }

    /// A receiver for signals published on the shared bus.
    pub fn subscribe_signals(&self) -> Receiver<SignalEvent> {
        self.bus.subscribe()
    }

    /// Apply a signal from another component.
    pub fn handle_signal(&mut self, signal: &DashboardSignal) {
        match signal {
            DashboardSignal::ActivateEditMode => self.enter_edit(),
            DashboardSignal::PeriodChanged { period } => {
                self.session.period = period.clone();
            }
            // Widgets refresh themselves.
            DashboardSignal::RefreshRequested => {}
        }
    }

    /// Apply every signal already queued on `rx` without waiting.
    ///
    /// Returns the number of signals handled.
    pub fn drain_signals(&mut self, rx: &mut Receiver<SignalEvent>) -> usize {
        let mut handled = 0;
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    self.handle_signal(&event.signal);
                    handled += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Dashboard signal receiver lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        handled
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Placed widgets whose module is available, in layout order.
    pub fn visible_items(&self) -> Vec<PlacedWidget> {
        match self.session.catalog.catalog() {
            Some(catalog) => visibility::visible_items(&self.session.layout, catalog),
            None => Vec::new(),
        }
    }

    /// Widget count shown to the user.
    pub fn visible_count(&self) -> usize {
        self.visible_items().len()
    }

    /// Render slots for the current layout and period.
    pub fn render<R: WidgetResolver>(&self, resolver: &R) -> Vec<RenderSlot<R::Widget>> {
        render::render_slots(
            &self.session.layout,
            &self.session.catalog,
            &self.session.period,
            resolver,
        )
    }

    /// Widget picker rows for `query`.
    pub fn library(&self, query: &LibraryQuery) -> Vec<LibraryEntry<'_>> {
        match self.session.catalog.catalog() {
            Some(catalog) => library::filter_library(catalog, query, &self.session.layout),
            None => Vec::new(),
        }
    }

    /// Picker category tabs.
    pub fn categories(&self) -> Vec<Category> {
        self.session
            .catalog
            .catalog()
            .map(library::categories)
            .unwrap_or_default()
    }

    // ---- private helpers ----

    fn replace_layout(&mut self, next: Layout) {
        self.session.layout = next;
    }
}

async fn fetch_catalog_state<C: CatalogSource + ?Sized>(source: &C) -> CatalogState {
    match source.fetch_catalog().await {
        Ok(catalog) => CatalogState::Loaded(catalog),
        Err(err) => {
            tracing::warn!(error = %err, "Widget catalog unavailable");
            CatalogState::Unavailable
        }
    }
}
