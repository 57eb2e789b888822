//! Cross-component signalling for the dashboard page.
//!
//! The hosting page owns one [`SignalBus`] and hands it to every component
//! that needs to coordinate (toolbar, dashboard controller, widgets). This
//! replaces ambient window-level broadcast events with an explicit, typed
//! channel.

pub mod bus;

pub use bus::{DashboardSignal, SignalBus, SignalEvent};
