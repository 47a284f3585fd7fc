//! Dashboard screen: IBI banner, counter cards, intents and threats
//! tables, and component status.

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use ibidash_core::{ApiSurface, Page, PanelView, Region};

use crate::action::Action;
use crate::component::Component;
use crate::keymap::Intent;
use crate::screen::ScreenId;
use crate::screens::Panels;

/// Height of the cards row: the threat-status panel lists five counters.
const CARDS_HEIGHT: u16 = 7;

pub struct DashboardScreen {
    focused: bool,
    panels: Panels,
}

impl DashboardScreen {
    pub fn new(surface: ApiSurface) -> Self {
        let focusable = match surface {
            ApiSurface::Stats => vec![
                Region::IntentsTable,
                Region::ThreatsTable,
                Region::ComponentStatus,
            ],
            ApiSurface::Direct => vec![Region::IntentsTable, Region::ThreatsTable],
        };
        Self {
            focused: false,
            panels: Panels::new(surface, Page::Dashboard.regions(surface), focusable),
        }
    }

    /// The banner only takes room while it has something to say.
    fn alert_height(&self) -> u16 {
        match self.panels.view(Region::IbiAlert) {
            PanelView::Alert(alert) if alert.active => 3,
            PanelView::Error(_) => 6,
            _ => 0,
        }
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let [alert, cards, tables, components] = Layout::vertical([
            Constraint::Length(self.alert_height()),
            Constraint::Length(CARDS_HEIGHT),
            Constraint::Min(8),
            Constraint::Length(8),
        ])
        .areas(area);

        if alert.height > 0 {
            self.panels.render(frame, alert, Region::IbiAlert, self.focused);
        }

        let [summary, threats, ndt] = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .areas(cards);
        self.panels.render(frame, summary, Region::IntentsSummary, self.focused);
        self.panels.render(frame, threats, Region::ThreatStatus, self.focused);
        self.panels.render(frame, ndt, Region::NdtStatus, self.focused);

        self.render_tables(frame, tables);
        self.panels
            .render(frame, components, Region::ComponentStatus, self.focused);
    }

    fn render_direct(&self, frame: &mut Frame, area: Rect) {
        let [stats, tables] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(8)]).areas(area);
        self.panels
            .render(frame, stats, Region::IntentStatistics, self.focused);
        self.render_tables(frame, tables);
    }

    fn render_tables(&self, frame: &mut Frame, area: Rect) {
        let [intents, threats] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);
        self.panels
            .render(frame, intents, Region::IntentsTable, self.focused);
        self.panels
            .render(frame, threats, Region::ThreatsTable, self.focused);
    }
}

impl Component for DashboardScreen {
    fn handle_intent(&mut self, intent: Intent) -> Result<Option<Action>> {
        if intent == Intent::Retry {
            return Ok(self.panels.retry_target().map(Action::Retry));
        }
        self.panels.navigate(intent);
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::RegionUpdated(region, view) = action {
            self.panels.update(*region, view);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        match self.panels.surface() {
            ApiSurface::Stats => self.render_stats(frame, area),
            ApiSurface::Direct => self.render_direct(frame, area),
        }
    }

    fn focused_region(&self) -> Option<Region> {
        self.panels.focused()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> ScreenId {
        ScreenId::Dashboard
    }
}
