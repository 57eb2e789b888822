//! Results of user actions that are not errors.

use medboard_core::PlacedWidget;

/// Result of adding a single widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Placed below the existing content.
    Added(PlacedWidget),
    /// Already on the dashboard; nothing changed.
    AlreadyAdded,
    /// Not in the available catalog (its module is not enabled).
    Unavailable,
}

impl AddOutcome {
    /// User-facing notice for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Added(_) => "Widget added to the dashboard",
            Self::AlreadyAdded => "This widget is already on the dashboard",
            Self::Unavailable => "Module not enabled",
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Result of "add all available widgets".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAddOutcome {
    /// The widgets that were placed, in catalog order.
    Added(Vec<PlacedWidget>),
    /// Every available widget is already placed.
    NothingToAdd,
    /// The user declined the confirmation prompt.
    Cancelled,
}

impl BulkAddOutcome {
    pub fn added_count(&self) -> usize {
        match self {
            Self::Added(items) => items.len(),
            Self::NothingToAdd | Self::Cancelled => 0,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Added(items) => match items.len() {
                1 => "Added 1 widget to the dashboard".to_string(),
                n => format!("Added {n} widgets to the dashboard"),
            },
            Self::NothingToAdd => "All available widgets are already on the dashboard".to_string(),
            Self::Cancelled => "No widgets were added".to_string(),
        }
    }
}

/// Result of trying to leave edit mode without saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveEditOutcome {
    /// Nothing was unsaved; back in view mode.
    Left,
    /// Unsaved changes were thrown away after confirmation.
    Discarded,
    /// The user declined; still in edit mode with the changes intact.
    Stayed,
}
