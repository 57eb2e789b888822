//! HTTP client for the dashboard layout-storage API.
//!
//! - [`DashboardApi`] talks to the backend over `reqwest`.
//! - [`LayoutStore`] / [`CatalogSource`] are the seams the dashboard
//!   controller is generic over.
//! - [`LayoutPersistence`] owns the fetch-default-or-create and
//!   patch-or-create policy on top of any [`LayoutStore`].

pub mod api;
pub mod config;
pub mod error;
pub mod persistence;
pub mod store;

pub use api::DashboardApi;
pub use config::ClientConfig;
pub use error::ClientError;
pub use persistence::{LayoutPersistence, LayoutSource, LoadedLayout};
pub use store::{CatalogSource, LayoutStore};
