#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use medboard_client::{CatalogSource, ClientError, LayoutStore};
use medboard_core::types::LayoutId;
use medboard_core::wire::CreateLayout;
use medboard_core::{DashboardSettings, Layout, PlacedWidget, WidgetCatalog, WidgetDefinition};
use medboard_dashboard::{Confirmer, DashboardController, StaticConfirmer};
use medboard_events::SignalBus;

fn unavailable() -> ClientError {
    ClientError::Api {
        status: 503,
        body: "storage offline".into(),
    }
}

// ---------------------------------------------------------------------------
// Layout store double
// ---------------------------------------------------------------------------

/// Single-user in-memory layout store with switchable failures.
#[derive(Default)]
pub struct MemoryStore {
    pub stored: Mutex<Option<Layout>>,
    pub fail_writes: AtomicBool,
    next_id: Mutex<LayoutId>,
}

impl MemoryStore {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_layout(items: Vec<PlacedWidget>) -> Arc<Self> {
        let store = Self::default();
        *store.stored.lock().unwrap() = Some(Layout::empty().with_items(items).with_id(1));
        *store.next_id.lock().unwrap() = 1;
        Arc::new(store)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn stored_items(&self) -> Option<Vec<PlacedWidget>> {
        self.stored.lock().unwrap().as_ref().map(|l| l.items.clone())
    }
}

#[async_trait]
impl LayoutStore for MemoryStore {
    async fn fetch_default(&self) -> Result<Option<Layout>, ClientError> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn create(&self, layout: &CreateLayout) -> Result<LayoutId, ClientError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let stored = Layout {
            id: Some(*next_id),
            name: layout.name.clone(),
            is_default: layout.is_default,
            items: layout.layout.clone(),
        };
        *self.stored.lock().unwrap() = Some(stored);
        Ok(*next_id)
    }

    async fn patch_items(&self, id: LayoutId, items: &[PlacedWidget]) -> Result<(), ClientError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut stored = self.stored.lock().unwrap();
        match stored.as_mut() {
            Some(layout) if layout.id == Some(id) => {
                layout.items = items.to_vec();
                Ok(())
            }
            _ => Err(ClientError::Api {
                status: 404,
                body: format!("layout {id} not found"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog double
// ---------------------------------------------------------------------------

/// Catalog source that serves whatever catalog is currently set; `None`
/// makes fetches fail.
pub struct SwitchableCatalog {
    current: Mutex<Option<WidgetCatalog>>,
}

impl SwitchableCatalog {
    pub fn new(catalog: WidgetCatalog) -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(Some(catalog)),
        })
    }

    pub fn offline() -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(None),
        })
    }

    pub fn set(&self, catalog: Option<WidgetCatalog>) {
        *self.current.lock().unwrap() = catalog;
    }
}

#[async_trait]
impl CatalogSource for SwitchableCatalog {
    async fn fetch_catalog(&self) -> Result<WidgetCatalog, ClientError> {
        self.current.lock().unwrap().clone().ok_or_else(unavailable)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn def(code: &str, module: &str, w: u32, h: u32) -> WidgetDefinition {
    WidgetDefinition::new(code, code, module).with_size(w, h)
}

/// `fin` (2x2) and `alerts` (2x1).
pub fn small_catalog() -> WidgetCatalog {
    WidgetCatalog::from_definitions(vec![
        def("fin", "invoicing", 2, 2),
        def("alerts", "patients", 2, 1),
    ])
}

/// A catalog with `n` widgets named `w0..wn`, alternating sizes.
pub fn catalog_of(n: u32) -> WidgetCatalog {
    WidgetCatalog::from_definitions((0..n).map(|i| {
        let module = if i % 2 == 0 { "clinic" } else { "pharmacy" };
        def(&format!("w{i}"), module, (i % 3) + 1, (i % 2) + 1)
    }))
}

pub type TestController = DashboardController<MemoryStore, SwitchableCatalog>;

pub async fn mount_with(
    store: &Arc<MemoryStore>,
    catalog: &Arc<SwitchableCatalog>,
    confirmer: Arc<dyn Confirmer>,
) -> (TestController, Arc<SignalBus>) {
    let bus = Arc::new(SignalBus::default());
    let controller = DashboardController::mount(
        Arc::clone(store),
        Arc::clone(catalog),
        confirmer,
        Arc::clone(&bus),
        DashboardSettings::default(),
    )
    .await;
    (controller, bus)
}

pub async fn mount(store: &Arc<MemoryStore>, catalog: &Arc<SwitchableCatalog>) -> TestController {
    mount_with(store, catalog, Arc::new(StaticConfirmer::accepting())).await.0
}

pub fn assert_no_overlap(items: &[PlacedWidget]) {
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            assert!(
                !medboard_core::grid::overlaps(a, b),
                "{} overlaps {}",
                a.code,
                b.code
            );
        }
    }
}

pub fn assert_unique_codes(layout: &Layout) {
    assert!(layout.validate().is_ok(), "layout invariants broken: {layout:?}");
}
