//! Module gating: which placed widgets may be shown and which catalog
//! widgets are still missing from a layout.
//!
//! Items whose module is disabled stay in the stored layout; they are only
//! filtered out of what gets rendered, so re-enabling the module brings
//! them back at their old position.

use crate::layout::{Layout, PlacedWidget};
use crate::widget::{WidgetCatalog, WidgetDefinition};

/// Placed widgets whose code is in the available catalog, in layout order.
pub fn visible_items(layout: &Layout, catalog: &WidgetCatalog) -> Vec<PlacedWidget> {
    let available = catalog.codes();
    layout
        .items
        .iter()
        .filter(|item| available.contains(item.code.as_str()))
        .cloned()
        .collect()
}

/// Placed widgets hidden because their module is not enabled.
pub fn hidden_items(layout: &Layout, catalog: &WidgetCatalog) -> Vec<PlacedWidget> {
    let available = catalog.codes();
    layout
        .items
        .iter()
        .filter(|item| !available.contains(item.code.as_str()))
        .cloned()
        .collect()
}

/// Catalog widgets not yet on the layout, in catalog order.
pub fn missing_widgets<'a>(layout: &Layout, catalog: &'a WidgetCatalog) -> Vec<&'a WidgetDefinition> {
    let placed = layout.codes();
    catalog
        .definitions()
        .filter(|def| !placed.contains(def.code.as_str()))
        .collect()
}
