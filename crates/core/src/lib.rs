//! Pure layout logic for the MedBoard customizable dashboard.
//!
//! This crate has no I/O: the catalog and layout are passed in by the
//! caller and every operation returns new values.
//!
//! - [`widget`]: widget definitions and the module-grouped catalog.
//! - [`layout`]: placed widgets and the layout value type.
//! - [`grid`]: single/batch placement and vertical compaction.
//! - [`library`]: search and category filtering for the widget picker.
//! - [`visibility`]: module gating of placed widgets.
//! - [`settings`]: configurable policy values.
//! - [`wire`]: request/response DTOs of the layout-storage API.

pub mod error;
pub mod grid;
pub mod layout;
pub mod library;
pub mod settings;
pub mod types;
pub mod visibility;
pub mod widget;
pub mod wire;

pub use error::CoreError;
pub use layout::{GridRect, Layout, PlacedWidget};
pub use settings::DashboardSettings;
pub use widget::{WidgetCatalog, WidgetDefinition, WidgetSize};
