//! Screen implementations. Each screen is a top-level Component.

pub mod dashboard;
pub mod intents;
pub mod mitigations;

use std::collections::HashMap;
use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::Rect;

use ibidash_core::{ApiSurface, PanelView, Region, Resource};

use crate::component::Component;
use crate::keymap::Intent;
use crate::screen::ScreenId;
use crate::widgets::panel;

static LOADING: PanelView = PanelView::Loading;

/// Create screen components for the tab bar.
pub fn create_screens(surface: ApiSurface) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new(surface)),
        ),
        (
            ScreenId::Mitigations,
            Box::new(mitigations::MitigationsScreen::new(surface)),
        ),
        (ScreenId::Intents, Box::new(intents::IntentsScreen::new(surface))),
    ]
}

// ── Shared panel state ────────────────────────────────────────────────

/// The latest view of every region on a screen, plus table focus and
/// per-table row selection.
pub struct Panels {
    surface: ApiSurface,
    regions: &'static [Region],
    /// Tables that can take focus, in focus-cycle order.
    focusable: Vec<Region>,
    views: HashMap<Region, Arc<PanelView>>,
    focus: usize,
    selected: HashMap<Region, usize>,
}

impl Panels {
    pub fn new(surface: ApiSurface, regions: &'static [Region], focusable: Vec<Region>) -> Self {
        Self {
            surface,
            regions,
            focusable,
            views: HashMap::new(),
            focus: 0,
            selected: HashMap::new(),
        }
    }

    pub fn surface(&self) -> ApiSurface {
        self.surface
    }

    /// Store a region's new view if it belongs to this screen.
    pub fn update(&mut self, region: Region, view: &Arc<PanelView>) {
        if !self.regions.contains(&region) {
            return;
        }
        let len = record_count(view);
        if let Some(sel) = self.selected.get_mut(&region) {
            *sel = (*sel).min(len.saturating_sub(1));
        }
        self.views.insert(region, Arc::clone(view));
    }

    pub fn view(&self, region: Region) -> &PanelView {
        self.views
            .get(&region)
            .map_or(&LOADING, |v| v.as_ref())
    }

    pub fn focused(&self) -> Option<Region> {
        self.focusable.get(self.focus).copied()
    }

    pub fn selected(&self, region: Region) -> usize {
        self.selected.get(&region).copied().unwrap_or(0)
    }

    /// Key of the selected record in the focused table.
    pub fn selected_key(&self) -> Option<String> {
        let region = self.focused()?;
        let table = self.view(region).as_table()?;
        table.records().nth(self.selected(region))?.key.clone()
    }

    /// Resource to reload for `r`: the focused region if it failed,
    /// otherwise the first failed region on the screen.
    pub fn retry_target(&self) -> Option<Resource> {
        let focused = self
            .focused()
            .and_then(|r| self.view(r).as_error())
            .map(|e| e.retry);
        focused.or_else(|| {
            self.regions
                .iter()
                .find_map(|&r| self.view(r).as_error().map(|e| e.retry))
        })
    }

    /// Apply a focus or row-motion intent. Returns whether it was handled.
    pub fn navigate(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::NextPanel => self.cycle_focus(1),
            Intent::PrevPanel => self.cycle_focus(self.focusable.len().saturating_sub(1)),
            Intent::Down => self.move_selection(1),
            Intent::Up => self.move_selection(-1),
            Intent::Top => self.move_to(0),
            Intent::Bottom => self.move_to(usize::MAX),
            _ => return false,
        }
        true
    }

    fn cycle_focus(&mut self, step: usize) {
        if !self.focusable.is_empty() {
            self.focus = (self.focus + step) % self.focusable.len();
        }
    }

    fn focused_len(&self) -> usize {
        self.focused().map_or(0, |r| record_count(self.view(r)))
    }

    fn move_to(&mut self, index: usize) {
        let len = self.focused_len();
        if let Some(region) = self.focused() {
            self.selected
                .insert(region, index.min(len.saturating_sub(1)));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let Some(region) = self.focused() else {
            return;
        };
        let next = self.selected(region).saturating_add_signed(delta);
        self.move_to(next);
    }

    /// Paint one region, respecting focus and surface support.
    pub fn render(&self, frame: &mut Frame, area: Rect, region: Region, screen_focused: bool) {
        let title = region.to_string();
        if !region.source().is_served_by(self.surface) {
            panel::render_unavailable(frame, area, &title, self.surface);
            return;
        }
        let focused = screen_focused && self.focused() == Some(region);
        panel::render_panel(
            frame,
            area,
            &title,
            self.view(region),
            focused,
            Some(self.selected(region)),
        );
    }
}

fn record_count(view: &PanelView) -> usize {
    view.as_table().map_or(0, |t| t.records().count())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use ibidash_core::{CellView, ErrorView, FailureKind, RowView, TableView};

    use super::*;

    const REGIONS: &[Region] = &[Region::IntentsTable, Region::ThreatsTable, Region::IbiAlert];

    fn table(keys: &[&str]) -> Arc<PanelView> {
        let rows = keys
            .iter()
            .map(|k| RowView::record(Some((*k).to_owned()), vec![CellView::plain(*k)]))
            .collect();
        Arc::new(PanelView::Table(TableView::new(&["ID"], rows, "empty")))
    }

    fn error(retry: Resource) -> Arc<PanelView> {
        Arc::new(PanelView::Error(ErrorView {
            title: format!("Error Loading {retry}"),
            message: "Unable to load data.".into(),
            detail: "HTTP error! status: 500".into(),
            kind: FailureKind::Http(500),
            retry,
        }))
    }

    fn panels() -> Panels {
        Panels::new(
            ApiSurface::Stats,
            REGIONS,
            vec![Region::IntentsTable, Region::ThreatsTable],
        )
    }

    #[test]
    fn selection_is_clamped_to_records() {
        let mut p = panels();
        p.update(Region::IntentsTable, &table(&["a", "b", "c"]));
        assert!(p.navigate(Intent::Bottom));
        assert_eq!(p.selected_key().as_deref(), Some("c"));
        assert!(p.navigate(Intent::Down));
        assert_eq!(p.selected_key().as_deref(), Some("c"));

        // Fewer rows after a refresh pull the selection back in range.
        p.update(Region::IntentsTable, &table(&["a"]));
        assert_eq!(p.selected_key().as_deref(), Some("a"));

        assert!(p.navigate(Intent::Up));
        assert_eq!(p.selected(Region::IntentsTable), 0);
    }

    #[test]
    fn placeholder_rows_are_not_selectable() {
        let mut p = panels();
        p.update(Region::IntentsTable, &table(&[]));
        assert_eq!(p.selected_key(), None);
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut p = panels();
        assert_eq!(p.focused(), Some(Region::IntentsTable));
        p.navigate(Intent::NextPanel);
        assert_eq!(p.focused(), Some(Region::ThreatsTable));
        p.navigate(Intent::NextPanel);
        assert_eq!(p.focused(), Some(Region::IntentsTable));
        p.navigate(Intent::PrevPanel);
        assert_eq!(p.focused(), Some(Region::ThreatsTable));
    }

    #[test]
    fn retry_prefers_the_focused_failure() {
        let mut p = panels();
        p.update(Region::IbiAlert, &error(Resource::IbiStatus));
        assert_eq!(p.retry_target(), Some(Resource::IbiStatus));

        p.update(Region::IntentsTable, &error(Resource::Intents));
        assert_eq!(p.retry_target(), Some(Resource::Intents));
    }

    #[test]
    fn foreign_regions_are_ignored() {
        let mut p = panels();
        p.update(Region::Mitigations, &table(&["m1"]));
        assert_eq!(p.view(Region::Mitigations), &PanelView::Loading);
        assert!(!p.navigate(Intent::Search));
    }
}
