//! Layout model: placed widget rectangles and the arrangement that owns them.
//!
//! A [`Layout`] is treated as a value. Every edit produces a new `Layout`
//! through the `with_*` / `without` methods instead of splicing the item
//! list in place, which keeps dirty detection a plain equality check.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::LayoutId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name given to synthesized and newly created layouts.
pub const DEFAULT_LAYOUT_NAME: &str = "Default Dashboard";

/// Rows a dragged or resized widget may reach. Placement below existing
/// content is not capped.
pub const MAX_GRID_ROWS: u32 = 10_000;

/// Built-in starter arrangement used when no layout is stored yet.
///
/// `(code, x, y, w, h)` on the 4-column grid.
pub const STARTER_WIDGETS: &[(&str, u32, u32, u32, u32)] = &[
    ("financial_summary", 0, 0, 2, 2),
    ("appointments_today", 2, 0, 2, 1),
    ("patient_alerts", 2, 1, 2, 1),
    ("pending_lab_orders", 0, 2, 2, 1),
    ("low_stock_medicines", 2, 2, 2, 1),
];

// ---------------------------------------------------------------------------
// GridRect / PlacedWidget
// ---------------------------------------------------------------------------

/// A rectangle in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// A widget placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedWidget {
    pub code: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PlacedWidget {
    pub fn new(code: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            code: code.into(),
            x,
            y,
            w,
            h,
        }
    }

    /// First row below this widget.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// First column right of this widget.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }

    /// Same code, new geometry.
    pub fn with_rect(&self, rect: GridRect) -> Self {
        Self {
            code: self.code.clone(),
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn default_layout_name() -> String {
    DEFAULT_LAYOUT_NAME.to_string()
}

/// A saved (or about to be saved) dashboard arrangement.
///
/// `id` stays `None` until the storage backend has accepted the layout.
/// On the wire the item list is called `layout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub id: Option<LayoutId>,
    #[serde(default = "default_layout_name")]
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(rename = "layout", default)]
    pub items: Vec<PlacedWidget>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            id: None,
            name: default_layout_name(),
            is_default: true,
            items: Vec::new(),
        }
    }
}

impl Layout {
    /// An empty, unpersisted default layout.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in starter layout used on first run.
    pub fn starter() -> Self {
        let items = STARTER_WIDGETS
            .iter()
            .map(|&(code, x, y, w, h)| PlacedWidget::new(code, x, y, w, h))
            .collect();
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.find(code).is_some()
    }

    pub fn find(&self, code: &str) -> Option<&PlacedWidget> {
        self.items.iter().find(|item| item.code == code)
    }

    pub fn codes(&self) -> HashSet<&str> {
        self.items.iter().map(|item| item.code.as_str()).collect()
    }

    /// First free row below all placed widgets (0 for an empty layout).
    pub fn bottom(&self) -> u32 {
        self.items.iter().map(PlacedWidget::bottom).max().unwrap_or(0)
    }

    /// Copy with a storage identifier attached.
    pub fn with_id(&self, id: LayoutId) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    /// Copy with the item list replaced wholesale.
    pub fn with_items(&self, items: Vec<PlacedWidget>) -> Self {
        Self {
            items,
            ..self.clone()
        }
    }

    /// Copy with `added` appended after the existing items.
    ///
    /// Fails without producing a layout if any added code is already
    /// present (or repeated within `added`).
    pub fn with_appended(
        &self,
        added: impl IntoIterator<Item = PlacedWidget>,
    ) -> Result<Self, CoreError> {
        let mut items = self.items.clone();
        items.extend(added);
        let next = self.with_items(items);
        next.validate()?;
        Ok(next)
    }

    /// Copy without the widget `code`. Unknown codes yield an identical copy.
    pub fn without(&self, code: &str) -> Self {
        self.with_items(
            self.items
                .iter()
                .filter(|item| item.code != code)
                .cloned()
                .collect(),
        )
    }

    /// Copy with the geometry of `code` replaced, or `None` if the widget is
    /// not placed.
    pub fn with_geometry(&self, code: &str, rect: GridRect) -> Option<Self> {
        let index = self.items.iter().position(|item| item.code == code)?;
        let mut items = self.items.clone();
        items[index] = items[index].with_rect(rect);
        Some(self.with_items(items))
    }

    /// Check the structural invariants: unique non-empty codes, spans of
    /// at least one cell and edges that fit in a `u32`.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if item.code.trim().is_empty() {
                return Err(CoreError::Validation(
                    "Placed widget code must not be empty".to_string(),
                ));
            }
            if item.w == 0 || item.h == 0 {
                return Err(CoreError::Validation(format!(
                    "Widget '{}' must span at least one cell (got {}x{})",
                    item.code, item.w, item.h
                )));
            }
            if item.x.checked_add(item.w).is_none() || item.y.checked_add(item.h).is_none() {
                return Err(CoreError::Validation(format!(
                    "Widget '{}' extends past the grid (x {}, y {})",
                    item.code, item.x, item.y
                )));
            }
            if !seen.insert(item.code.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Widget '{}' is placed more than once",
                    item.code
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
