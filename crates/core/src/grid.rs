//! Grid engine: deterministic, non-overlapping placement on a column grid.
//!
//! All functions are pure. They compute rectangles and leave it to the
//! caller to append them to a [`Layout`].

use crate::layout::{GridRect, Layout, PlacedWidget, MAX_GRID_ROWS};
use crate::widget::WidgetDefinition;

/// Column count at the largest breakpoint.
pub const DEFAULT_GRID_COLS: u32 = 4;

/// Whether two rectangles share at least one cell.
pub fn overlaps(a: &PlacedWidget, b: &PlacedWidget) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Force a rectangle onto a `cols`-wide grid: spans become at least one
/// cell, width is capped at `cols` and the rectangle is shifted left until
/// it fits. Vertically it is kept within [`MAX_GRID_ROWS`].
pub fn clamp_to_grid(rect: GridRect, cols: u32) -> GridRect {
    let cols = cols.max(1);
    let w = rect.w.clamp(1, cols);
    let h = rect.h.clamp(1, MAX_GRID_ROWS);
    GridRect {
        x: rect.x.min(cols - w),
        y: rect.y.min(MAX_GRID_ROWS - h),
        w,
        h,
    }
}

/// Default span of `widget`, clamped to the grid width.
fn placement_size(widget: &WidgetDefinition, cols: u32) -> (u32, u32) {
    let size = widget.size();
    (size.w.clamp(1, cols.max(1)), size.h.max(1))
}

/// Place one widget below everything already on the grid.
///
/// The new rectangle starts at column 0 on the first free row, so it
/// cannot intersect any existing item.
pub fn place_single(layout: &Layout, widget: &WidgetDefinition, cols: u32) -> PlacedWidget {
    let (w, h) = placement_size(widget, cols);
    PlacedWidget::new(widget.code.clone(), 0, layout.bottom(), w, h)
}

/// Shelf-pack `widgets` left to right, top to bottom, starting on the
/// first free row below `layout`.
///
/// Input order is kept: a widget that does not fit in the remaining width
/// opens a new row, and a row that is filled exactly is closed straight
/// away. Rows are as tall as their tallest widget.
pub fn place_batch<'a>(
    layout: &Layout,
    widgets: impl IntoIterator<Item = &'a WidgetDefinition>,
    cols: u32,
) -> Vec<PlacedWidget> {
    let cols = cols.max(1);
    let mut current_x = 0;
    let mut current_y = layout.bottom();
    let mut row_max_height = 0;
    let mut placed = Vec::new();

    for widget in widgets {
        let (w, h) = placement_size(widget, cols);

        if current_x + w > cols {
            current_x = 0;
            current_y = current_y.saturating_add(row_max_height);
            row_max_height = 0;
        }

        placed.push(PlacedWidget::new(widget.code.clone(), current_x, current_y, w, h));
        current_x += w;
        row_max_height = row_max_height.max(h);

        if current_x >= cols {
            current_x = 0;
            current_y = current_y.saturating_add(row_max_height);
            row_max_height = 0;
        }
    }

    placed
}

/// Move every item as far up as it can go without colliding.
///
/// Items are visited in reading order (`y`, then `x`). Each one lands on
/// the lowest free row that keeps it after its predecessor in reading
/// order, so the relative order of codes never changes. Columns and spans
/// are untouched. The result is returned in reading order.
pub fn compact(items: &[PlacedWidget]) -> Vec<PlacedWidget> {
    let mut ordered: Vec<&PlacedWidget> = items.iter().collect();
    ordered.sort_by_key(|item| (item.y, item.x));

    let mut placed: Vec<PlacedWidget> = Vec::with_capacity(items.len());
    for item in ordered {
        let floor = match placed.last() {
            None => 0,
            Some(prev) if item.x > prev.x => prev.y,
            Some(prev) => prev.y.saturating_add(1),
        };

        let mut candidate = PlacedWidget { y: floor, ..item.clone() };
        loop {
            let blocked_until = placed
                .iter()
                .filter(|other| overlaps(other, &candidate))
                .map(PlacedWidget::bottom)
                .min();
            match blocked_until {
                Some(row) => candidate.y = row,
                None => break,
            }
        }
        placed.push(candidate);
    }

    placed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
