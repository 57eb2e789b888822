//! Storage seams the dashboard controller is generic over.
//!
//! [`DashboardApi`] implements both traits over HTTP. Tests and embedders
//! can provide their own implementations.

use std::sync::Arc;

use async_trait::async_trait;
use medboard_core::types::LayoutId;
use medboard_core::wire::CreateLayout;
use medboard_core::{Layout, PlacedWidget, WidgetCatalog};

use crate::api::DashboardApi;
use crate::error::ClientError;

/// Where layouts are stored.
#[async_trait]
pub trait LayoutStore: Send + Sync {
    /// The caller's default layout, `None` when none exists yet.
    async fn fetch_default(&self) -> Result<Option<Layout>, ClientError>;

    /// Store a new layout and return its identifier.
    async fn create(&self, layout: &CreateLayout) -> Result<LayoutId, ClientError>;

    /// Replace the items of an existing layout.
    async fn patch_items(&self, id: LayoutId, items: &[PlacedWidget]) -> Result<(), ClientError>;
}

/// Where the widget catalog comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<WidgetCatalog, ClientError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl LayoutStore for DashboardApi {
    async fn fetch_default(&self) -> Result<Option<Layout>, ClientError> {
        self.fetch_default_layout().await
    }

    async fn create(&self, layout: &CreateLayout) -> Result<LayoutId, ClientError> {
        self.create_layout(layout).await
    }

    async fn patch_items(&self, id: LayoutId, items: &[PlacedWidget]) -> Result<(), ClientError> {
        self.patch_layout(id, items).await
    }
}

#[async_trait]
impl CatalogSource for DashboardApi {
    async fn fetch_catalog(&self) -> Result<WidgetCatalog, ClientError> {
        DashboardApi::fetch_catalog(self).await
    }
}

// ---------------------------------------------------------------------------
// Shared handles
// ---------------------------------------------------------------------------

#[async_trait]
impl<T: LayoutStore + ?Sized> LayoutStore for Arc<T> {
    async fn fetch_default(&self) -> Result<Option<Layout>, ClientError> {
        (**self).fetch_default().await
    }

    async fn create(&self, layout: &CreateLayout) -> Result<LayoutId, ClientError> {
        (**self).create(layout).await
    }

    async fn patch_items(&self, id: LayoutId, items: &[PlacedWidget]) -> Result<(), ClientError> {
        (**self).patch_items(id, items).await
    }
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    async fn fetch_catalog(&self) -> Result<WidgetCatalog, ClientError> {
        (**self).fetch_catalog().await
    }
}
