use medboard_client::ClientError;
use medboard_core::CoreError;

/// Errors returned by [`DashboardController`](crate::DashboardController)
/// operations.
///
/// Duplicate or unavailable adds and declined confirmations are outcomes,
/// not errors; see [`crate::outcome`].
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Geometry edits require edit mode.
    #[error("The dashboard is not in edit mode")]
    NotEditing,

    /// The widget is not on the layout.
    #[error("Widget '{0}' is not placed on the dashboard")]
    NotPlaced(String),

    /// Another save has not finished yet.
    #[error("A dashboard save is already in progress")]
    SaveInProgress,

    /// The storage backend rejected or never received the save. The layout
    /// stays dirty and can be saved again.
    #[error("Failed to save dashboard layout: {0}")]
    Save(#[source] ClientError),

    /// An edit would break a layout invariant.
    #[error(transparent)]
    Layout(#[from] CoreError),
}
