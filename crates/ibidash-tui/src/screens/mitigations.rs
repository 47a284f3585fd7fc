//! Mitigations screen: the mitigation actions table.

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::Rect;

use ibidash_core::{ApiSurface, Page, Region};

use crate::action::Action;
use crate::component::Component;
use crate::keymap::Intent;
use crate::screen::ScreenId;
use crate::screens::Panels;

pub struct MitigationsScreen {
    focused: bool,
    panels: Panels,
}

impl MitigationsScreen {
    pub fn new(surface: ApiSurface) -> Self {
        Self {
            focused: false,
            panels: Panels::new(
                surface,
                Page::Mitigations.regions(surface),
                vec![Region::Mitigations],
            ),
        }
    }
}

impl Component for MitigationsScreen {
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
        self.panels
            .render(frame, area, Region::Mitigations, self.focused);
    }

    fn focused_region(&self) -> Option<Region> {
        self.panels.focused()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> ScreenId {
        ScreenId::Mitigations
    }
}
