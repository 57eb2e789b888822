//! Widget library filtering for the "add widget" picker.
//!
//! Pure presentation logic: nothing here mutates the layout or catalog.

use serde::Serialize;

use crate::layout::Layout;
use crate::widget::{WidgetCatalog, WidgetDefinition};

/// Module filter value that selects every module.
pub const ALL_MODULES: &str = "all";

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Which module(s) the picker is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModuleFilter {
    #[default]
    All,
    Module(String),
}

impl ModuleFilter {
    /// Parse the picker's category value. `"all"` and the empty string
    /// select every module.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_MODULES) {
            Self::All
        } else {
            Self::Module(value.to_string())
        }
    }
}

impl From<&str> for ModuleFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Search text plus module filter, as entered in the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryQuery {
    pub search: String,
    pub module: ModuleFilter,
}

impl LibraryQuery {
    pub fn new(search: impl Into<String>, module: impl Into<ModuleFilter>) -> Self {
        Self {
            search: search.into(),
            module: module.into(),
        }
    }

    fn matches(&self, needle: &str, def: &WidgetDefinition) -> bool {
        if needle.is_empty() {
            return true;
        }
        def.name.to_lowercase().contains(needle)
            || def
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A picker row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryEntry<'a> {
    pub definition: &'a WidgetDefinition,
    /// Already on the current layout; the picker greys these out.
    pub is_already_added: bool,
}

/// A category tab with its widget count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub module: String,
    pub count: usize,
}

/// Filter the catalog for the picker.
///
/// The module filter is applied first, then a case-insensitive substring
/// match of the trimmed search text against name and description.
/// Results keep catalog order.
pub fn filter_library<'a>(
    catalog: &'a WidgetCatalog,
    query: &LibraryQuery,
    layout: &Layout,
) -> Vec<LibraryEntry<'a>> {
    let needle = query.search.trim().to_lowercase();
    let placed = layout.codes();

    let candidates: Box<dyn Iterator<Item = &'a WidgetDefinition> + 'a> = match &query.module {
        ModuleFilter::All => Box::new(catalog.definitions()),
        ModuleFilter::Module(module) => {
            Box::new(catalog.module(module).unwrap_or_default().iter())
        }
    };

    candidates
        .filter(|def| query.matches(&needle, def))
        .map(|def| LibraryEntry {
            definition: def,
            is_already_added: placed.contains(def.code.as_str()),
        })
        .collect()
}

/// Modules with their widget counts, in catalog order.
pub fn categories(catalog: &WidgetCatalog) -> Vec<Category> {
    catalog
        .modules()
        .map(|(module, defs)| Category {
            module: module.to_string(),
            count: defs.len(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
