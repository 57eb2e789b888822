//! Turning a layout into render slots.
//!
//! Each visible item is resolved to a widget through a [`WidgetResolver`].
//! Anything that cannot be resolved becomes a placeholder slot at the same
//! position, so one broken widget never takes the dashboard down.

use medboard_core::{Layout, PlacedWidget, WidgetDefinition};
use serde::Serialize;

use crate::session::CatalogState;

/// Produces the widget rendered for a catalog definition.
pub trait WidgetResolver {
    type Widget;

    /// `None` when no widget implementation exists for `definition`.
    fn resolve(&self, definition: &WidgetDefinition, period: &str) -> Option<Self::Widget>;
}

/// Why a slot shows a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderReason {
    /// The widget's module is not enabled, or the catalog is unavailable.
    ModuleNotEnabled,
    /// The catalog knows the widget but the resolver does not.
    UnknownWidget,
}

impl PlaceholderReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::ModuleNotEnabled => "Module not enabled",
            Self::UnknownWidget => "Unknown widget",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent<W> {
    Widget(W),
    Placeholder(PlaceholderReason),
}

/// One grid cell range and what to draw in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSlot<W> {
    pub placement: PlacedWidget,
    pub content: SlotContent<W>,
}

impl<W> RenderSlot<W> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, SlotContent::Placeholder(_))
    }
}

/// Build the render slots for `layout`.
///
/// With a loaded catalog, only items whose code is available get a slot.
/// With an unavailable catalog every item gets a
/// [`PlaceholderReason::ModuleNotEnabled`] slot.
pub fn render_slots<R: WidgetResolver>(
    layout: &Layout,
    catalog: &CatalogState,
    period: &str,
    resolver: &R,
) -> Vec<RenderSlot<R::Widget>> {
    let Some(catalog) = catalog.catalog() else {
        return layout
            .items
            .iter()
            .map(|item| RenderSlot {
                placement: item.clone(),
                content: SlotContent::Placeholder(PlaceholderReason::ModuleNotEnabled),
            })
            .collect();
    };

    layout
        .items
        .iter()
        .filter_map(|item| {
            let definition = catalog.find(&item.code)?;
            let content = match resolver.resolve(definition, period) {
                Some(widget) => SlotContent::Widget(widget),
                None => {
                    tracing::warn!(code = %item.code, "No widget implementation for catalog entry");
                    SlotContent::Placeholder(PlaceholderReason::UnknownWidget)
                }
            };
            Some(RenderSlot {
                placement: item.clone(),
                content,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Descriptor resolver
// ---------------------------------------------------------------------------

/// What a host needs to instantiate a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetDescriptor {
    pub code: String,
    pub name: String,
    pub widget_type: String,
    pub period: String,
}

/// Resolves every definition whose type is in `known_types` (or every
/// definition when the list is empty) into a [`WidgetDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct DescriptorResolver {
    known_types: Vec<String>,
}

impl DescriptorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_known_types<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            known_types: types.into_iter().map(Into::into).collect(),
        }
    }
}

impl WidgetResolver for DescriptorResolver {
    type Widget = WidgetDescriptor;

    fn resolve(&self, definition: &WidgetDefinition, period: &str) -> Option<WidgetDescriptor> {
        if !self.known_types.is_empty() && !self.known_types.contains(&definition.widget_type) {
            return None;
        }
        Some(WidgetDescriptor {
            code: definition.code.clone(),
            name: definition.name.clone(),
            widget_type: definition.widget_type.clone(),
            period: period.to_string(),
        })
    }
}
