// ── Reactive region store ──
//
// One `watch` channel per display region. Renderers publish whole
// panels; front ends subscribe and repaint on change. Regions are
// independent: publishing to one never touches another.

use std::collections::HashMap;
use std::sync::Arc;

use strum::IntoEnumIterator;
use tokio::sync::watch;

use crate::resource::Region;
use crate::view::PanelView;

/// Latest panel for every region, starting as `Loading`.
pub struct RegionStore {
    regions: HashMap<Region, watch::Sender<Arc<PanelView>>>,
}

impl RegionStore {
    pub fn new() -> Self {
        let regions = Region::iter()
            .map(|region| {
                let (tx, _) = watch::channel(Arc::new(PanelView::Loading));
                (region, tx)
            })
            .collect();
        Self { regions }
    }

    /// Replace a region's panel.
    pub fn publish(&self, region: Region, panel: PanelView) {
        if let Some(tx) = self.regions.get(&region) {
            // `send_modify` updates unconditionally, even with zero receivers.
            tx.send_modify(|current| *current = Arc::new(panel));
        }
    }

    /// The current panel (cheap `Arc` clone).
    pub fn current(&self, region: Region) -> Arc<PanelView> {
        self.regions
            .get(&region)
            .map_or_else(|| Arc::new(PanelView::Loading), |tx| tx.borrow().clone())
    }

    /// Subscribe to a region's changes.
    pub fn subscribe(&self, region: Region) -> Option<watch::Receiver<Arc<PanelView>>> {
        self.regions.get(&region).map(watch::Sender::subscribe)
    }
}

impl Default for RegionStore {
    fn default() -> Self {
        Self::new()
    }
}
