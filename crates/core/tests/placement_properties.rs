//! Placement and filtering properties that must hold for any sequence of
//! edits, checked over deterministic pseudo-random inputs.

use medboard_core::grid::{self, overlaps, DEFAULT_GRID_COLS};
use medboard_core::visibility::{missing_widgets, visible_items};
use medboard_core::{Layout, PlacedWidget, WidgetCatalog, WidgetDefinition};

/// Small linear congruential generator so the cases are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u32) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) % u64::from(bound)) as u32
    }
}

fn catalog(rng: &mut Lcg, n: usize) -> WidgetCatalog {
    WidgetCatalog::from_definitions((0..n).map(|i| {
        let module = ["invoicing", "laboratory", "pharmacy"][i % 3];
        WidgetDefinition::new(format!("w{i}"), format!("Widget {i}"), module)
            .with_size(rng.next(5) + 1, rng.next(3) + 1)
    }))
}

fn assert_no_overlap(items: &[PlacedWidget]) {
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            assert!(!overlaps(a, b), "{a:?} overlaps {b:?}");
        }
    }
}

// ---------------------------------------------------------------------------
// Test: single and batch placement never overlap
// ---------------------------------------------------------------------------

#[test]
fn mixed_single_and_batch_adds_never_overlap() {
    for seed in 0..50 {
        let mut rng = Lcg(seed);
        let catalog = catalog(&mut rng, 14);
        let mut layout = Layout::empty();

        for step in 0..6 {
            let missing = missing_widgets(&layout, &catalog);
            if missing.is_empty() {
                break;
            }
            let placed = if step % 2 == 0 {
                let pick = missing[rng.next(missing.len() as u32) as usize];
                vec![grid::place_single(&layout, pick, DEFAULT_GRID_COLS)]
            } else {
                let take = (rng.next(4) + 1) as usize;
                grid::place_batch(&layout, missing.into_iter().take(take), DEFAULT_GRID_COLS)
            };
            layout = layout.with_appended(placed).unwrap();

            assert_no_overlap(&layout.items);
            assert!(layout.validate().is_ok());
            assert!(layout.items.iter().all(|p| p.right() <= DEFAULT_GRID_COLS));
        }
    }
}

// ---------------------------------------------------------------------------
// Test: packing order on a 4-column grid
// ---------------------------------------------------------------------------

#[test]
fn three_half_width_widgets_fill_one_and_a_half_rows() {
    let defs: Vec<WidgetDefinition> = ["a", "b", "c"]
        .iter()
        .map(|code| WidgetDefinition::new(*code, *code, "clinic").with_size(2, 1))
        .collect();

    let placed = grid::place_batch(&Layout::empty(), &defs, 4);
    let positions: Vec<(&str, u32, u32)> =
        placed.iter().map(|p| (p.code.as_str(), p.x, p.y)).collect();
    assert_eq!(positions, vec![("a", 0, 0), ("b", 2, 0), ("c", 0, 1)]);
}

// ---------------------------------------------------------------------------
// Test: filtering is idempotent and never drops stored items
// ---------------------------------------------------------------------------

#[test]
fn visibility_filter_is_idempotent() {
    let mut rng = Lcg(7);
    let full = catalog(&mut rng, 9);
    let batch = grid::place_batch(&Layout::empty(), full.definitions(), 4);
    let layout = Layout::empty().with_items(batch);

    let mut partial = full.clone();
    partial.remove_module("laboratory");

    let once = visible_items(&layout, &partial);
    let twice = visible_items(&Layout::empty().with_items(once.clone()), &partial);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 6);
    assert_eq!(layout.len(), 9);
    assert_eq!(visible_items(&layout, &full), layout.items);
}

// ---------------------------------------------------------------------------
// Test: compaction keeps the layout valid and order stable
// ---------------------------------------------------------------------------

#[test]
fn compaction_keeps_reading_order_and_no_overlap() {
    for seed in 0..30 {
        let mut rng = Lcg(seed);
        let items: Vec<PlacedWidget> = (0..8)
            .map(|i| {
                let w = rng.next(4) + 1;
                let x = rng.next(4 - w + 1);
                // Spread rows far apart so the input itself does not overlap.
                PlacedWidget::new(format!("w{i}"), x, i * 4 + rng.next(2), w, rng.next(3) + 1)
            })
            .collect();

        let compacted = grid::compact(&items);
        assert_eq!(compacted.len(), items.len());
        assert_no_overlap(&compacted);

        let mut expected: Vec<&PlacedWidget> = items.iter().collect();
        expected.sort_by_key(|p| (p.y, p.x));
        let expected_codes: Vec<&str> = expected.iter().map(|p| p.code.as_str()).collect();
        let compacted_codes: Vec<&str> = compacted.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(compacted_codes, expected_codes);

        for item in &compacted {
            let original = items.iter().find(|p| p.code == item.code).unwrap();
            assert_eq!((item.x, item.w, item.h), (original.x, original.w, original.h));
            assert!(item.y <= original.y);
        }
    }
}
