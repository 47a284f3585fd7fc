// ── Page navigation and client-side filters ──
//
// Exactly one page is visible at a time. Filters are applied when a
// region is viewed and never trigger a fetch.

use std::collections::HashMap;
use std::sync::Arc;

use strum::{Display, EnumIter};
use tokio::sync::watch;

use crate::config::ApiSurface;
use crate::resource::{Region, Resource};
use crate::view::{PanelView, RowView, TableView};

/// Placeholder shown when a filter hides every record.
pub const NO_MATCHES: &str = "No rows match the current filter";

// ── Pages ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Page {
    #[default]
    Dashboard,
    Mitigations,
    Intents,
}

impl Page {
    /// Regions painted on this page.
    pub fn regions(self, surface: ApiSurface) -> &'static [Region] {
        match (self, surface) {
            (Self::Dashboard, ApiSurface::Stats) => &[
                Region::IbiAlert,
                Region::IntentsSummary,
                Region::ThreatStatus,
                Region::NdtStatus,
                Region::IntentsTable,
                Region::ThreatsTable,
                Region::ComponentStatus,
            ],
            (Self::Dashboard, ApiSurface::Direct) => &[
                Region::IntentStatistics,
                Region::IntentsTable,
                Region::ThreatsTable,
            ],
            (Self::Mitigations, _) => &[Region::Mitigations],
            (Self::Intents, _) => &[Region::IntentManagement],
        }
    }

    /// Resources loaded when the page becomes visible, in load order.
    pub fn resources(self, surface: ApiSurface) -> Vec<Resource> {
        let mut out: Vec<Resource> = Vec::new();
        for region in self.regions(surface) {
            let resource = region.source();
            if resource.is_served_by(surface) && !out.contains(&resource) {
                out.push(resource);
            }
        }
        out
    }
}

// ── Filters ──────────────────────────────────────────────────────────

/// A client-side row predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    /// Case-insensitive equality on one column. An empty value shows all.
    Column { column: String, value: String },
    /// Case-insensitive substring match across every cell.
    Text(String),
}

impl RowFilter {
    /// Whether this filter lets every row through.
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Column { value, .. } => value.trim().is_empty(),
            Self::Text(needle) => needle.trim().is_empty(),
        }
    }

    fn matches(&self, table: &TableView, row: &RowView) -> bool {
        match self {
            Self::Column { column, value } => {
                let Some(index) = table.column_index(column) else {
                    return false;
                };
                row.cells
                    .get(index)
                    .is_some_and(|cell| cell.text.trim().to_lowercase() == value.trim().to_lowercase())
            }
            Self::Text(needle) => {
                let needle = needle.trim().to_lowercase();
                row.cells
                    .iter()
                    .any(|cell| cell.text.to_lowercase().contains(&needle))
            }
        }
    }

    /// Apply to a table. Placeholder rows pass through untouched; if
    /// records existed but none match, a single `NO_MATCHES` row remains.
    pub fn apply(&self, table: &TableView) -> TableView {
        if self.is_noop() || table.records().next().is_none() {
            return table.clone();
        }
        let rows: Vec<RowView> = table
            .records()
            .filter(|row| self.matches(table, row))
            .cloned()
            .collect();
        TableView::new(&table.columns, rows, NO_MATCHES)
    }
}

// ── Navigator ────────────────────────────────────────────────────────

/// Active page plus per-region filters.
pub struct Navigator {
    page: watch::Sender<Page>,
    filters: watch::Sender<Arc<HashMap<Region, RowFilter>>>,
}

impl Navigator {
    pub fn new() -> Self {
        let (page, _) = watch::channel(Page::default());
        let (filters, _) = watch::channel(Arc::new(HashMap::new()));
        Self { page, filters }
    }

    pub fn current(&self) -> Page {
        *self.page.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Page> {
        self.page.subscribe()
    }

    /// Make `page` the visible page. Returns `true` if it changed.
    pub fn select(&self, page: Page) -> bool {
        self.page.send_if_modified(|current| {
            if *current == page {
                false
            } else {
                *current = page;
                true
            }
        })
    }

    pub fn set_filter(&self, region: Region, filter: RowFilter) {
        self.filters.send_modify(|filters| {
            let mut next = HashMap::clone(filters);
            next.insert(region, filter);
            *filters = Arc::new(next);
        });
    }

    pub fn clear_filter(&self, region: Region) {
        self.filters.send_if_modified(|filters| {
            if !filters.contains_key(&region) {
                return false;
            }
            let mut next = HashMap::clone(filters);
            next.remove(&region);
            *filters = Arc::new(next);
            true
        });
    }

    pub fn filter(&self, region: Region) -> Option<RowFilter> {
        self.filters.borrow().get(&region).cloned()
    }

    /// A region's panel with its filter applied.
    pub fn view(&self, region: Region, panel: &PanelView) -> PanelView {
        match (panel, self.filter(region)) {
            (PanelView::Table(table), Some(filter)) => PanelView::Table(filter.apply(table)),
            _ => panel.clone(),
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
