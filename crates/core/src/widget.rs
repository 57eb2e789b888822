//! Widget catalog model.
//!
//! The catalog is supplied by the backend already filtered to the caller's
//! entitled modules. Nothing in this crate applies entitlement logic; the
//! catalog is only ever used for membership tests.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Width used when a definition carries no `default_size`.
pub const FALLBACK_WIDGET_WIDTH: u32 = 2;

/// Height used when a definition carries no `default_size`.
pub const FALLBACK_WIDGET_HEIGHT: u32 = 1;

// ---------------------------------------------------------------------------
// WidgetSize
// ---------------------------------------------------------------------------

/// Default span of a widget in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSize {
    pub w: u32,
    pub h: u32,
}

impl WidgetSize {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

impl Default for WidgetSize {
    fn default() -> Self {
        Self {
            w: FALLBACK_WIDGET_WIDTH,
            h: FALLBACK_WIDGET_HEIGHT,
        }
    }
}

// ---------------------------------------------------------------------------
// WidgetDefinition
// ---------------------------------------------------------------------------

/// A widget that can be placed on the dashboard.
///
/// Immutable from the point of view of the layout engine: definitions are
/// owned by the catalog and only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDefinition {
    /// Stable identifier, unique across the catalog.
    pub code: String,
    pub name: String,
    /// Owning business module (e.g. `"invoicing"`, `"laboratory"`).
    pub module: String,
    /// Rendering family (`"chart"`, `"list"`, `"stat"`, ...).
    #[serde(rename = "type", default)]
    pub widget_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_size: Option<WidgetSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WidgetDefinition {
    pub fn new(code: impl Into<String>, name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            module: module.into(),
            widget_type: String::new(),
            default_size: None,
            description: None,
        }
    }

    pub fn with_size(mut self, w: u32, h: u32) -> Self {
        self.default_size = Some(WidgetSize::new(w, h));
        self
    }

    pub fn with_type(mut self, widget_type: impl Into<String>) -> Self {
        self.widget_type = widget_type.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The size to place this widget at, falling back to 2x1.
    pub fn size(&self) -> WidgetSize {
        self.default_size.unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// WidgetCatalog
// ---------------------------------------------------------------------------

/// Mapping of module name to the widgets it provides.
///
/// Module order is the order received from the backend. "Catalog order"
/// everywhere in this workspace means module order, then definition order
/// within the module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetCatalog {
    modules: IndexMap<String, Vec<WidgetDefinition>>,
}

impl WidgetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog by grouping definitions under their `module` field,
    /// keeping first-seen module order.
    pub fn from_definitions(definitions: impl IntoIterator<Item = WidgetDefinition>) -> Self {
        let mut modules: IndexMap<String, Vec<WidgetDefinition>> = IndexMap::new();
        for def in definitions {
            modules.entry(def.module.clone()).or_default().push(def);
        }
        Self { modules }
    }

    /// Replace (or add) the widget list of a module.
    pub fn insert_module(&mut self, module: impl Into<String>, definitions: Vec<WidgetDefinition>) {
        self.modules.insert(module.into(), definitions);
    }

    /// Builder form of [`insert_module`](Self::insert_module).
    pub fn with_module(mut self, module: impl Into<String>, definitions: Vec<WidgetDefinition>) -> Self {
        self.insert_module(module, definitions);
        self
    }

    /// Drop a module, returning its definitions if it was present.
    pub fn remove_module(&mut self, module: &str) -> Option<Vec<WidgetDefinition>> {
        self.modules.shift_remove(module)
    }

    /// Total number of widget definitions across all modules.
    pub fn len(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn modules(&self) -> impl Iterator<Item = (&str, &[WidgetDefinition])> {
        self.modules
            .iter()
            .map(|(name, defs)| (name.as_str(), defs.as_slice()))
    }

    pub fn module(&self, name: &str) -> Option<&[WidgetDefinition]> {
        self.modules.get(name).map(Vec::as_slice)
    }

    /// Every definition in catalog order.
    pub fn definitions(&self) -> impl Iterator<Item = &WidgetDefinition> {
        self.modules.values().flatten()
    }

    pub fn find(&self, code: &str) -> Option<&WidgetDefinition> {
        self.definitions().find(|def| def.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    /// The set of available widget codes, used for module gating.
    pub fn codes(&self) -> HashSet<&str> {
        self.definitions().map(|def| def.code.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
