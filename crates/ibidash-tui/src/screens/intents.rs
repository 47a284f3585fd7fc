//! Intent management screen: every intent, with deletion.

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use ibidash_core::{ApiSurface, Page, Region};

use crate::action::Action;
use crate::component::Component;
use crate::keymap::Intent;
use crate::screen::ScreenId;
use crate::screens::Panels;
use crate::theme;

pub struct IntentsScreen {
    focused: bool,
    panels: Panels,
}

impl IntentsScreen {
    pub fn new(surface: ApiSurface) -> Self {
        Self {
            focused: false,
            panels: Panels::new(
                surface,
                Page::Intents.regions(surface),
                vec![Region::IntentManagement],
            ),
        }
    }
}

impl Component for IntentsScreen {
    fn handle_intent(&mut self, intent: Intent) -> Result<Option<Action>> {
        match intent {
            Intent::Retry => Ok(self.panels.retry_target().map(Action::Retry)),
            Intent::Delete => Ok(self.panels.selected_key().map(Action::RequestDelete)),
            other => {
                self.panels.navigate(other);
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::RegionUpdated(region, view) = action {
            self.panels.update(*region, view);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [table, hints] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
        self.panels
            .render(frame, table, Region::IntentManagement, self.focused);

        let line = Line::from(vec![
            Span::styled(" d ", theme::key_hint_key()),
            Span::styled("delete selected  ", theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("filter  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("clear filter", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), hints);
    }

    fn focused_region(&self) -> Option<Region> {
        self.panels.focused()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> ScreenId {
        ScreenId::Intents
    }
}
