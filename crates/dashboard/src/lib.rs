//! Dashboard controller for the MedBoard customizable dashboard.
//!
//! Owns the editing session of one dashboard page: the View/Edit mode,
//! the in-memory layout and its dirty state, the widget catalog, and the
//! save/discard protocol. Placement is delegated to
//! [`medboard_core::grid`], storage to [`medboard_client`].

pub mod confirm;
pub mod controller;
pub mod error;
pub mod outcome;
pub mod render;
pub mod session;

pub use confirm::{ConfirmPrompt, Confirmer, StaticConfirmer};
pub use controller::DashboardController;
pub use error::DashboardError;
pub use outcome::{AddOutcome, BulkAddOutcome, LeaveEditOutcome};
pub use render::{
    DescriptorResolver, PlaceholderReason, RenderSlot, SlotContent, WidgetDescriptor, WidgetResolver,
};
pub use session::{CatalogState, DashboardSession, Mode, PendingSave};
