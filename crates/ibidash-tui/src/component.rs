//! Component trait, the building block for every screen.

use color_eyre::eyre::Result;
use ratatui::{Frame, layout::Rect};

use ibidash_core::Region;

use crate::action::Action;
use crate::keymap::Intent;
use crate::screen::ScreenId;

/// Every screen implements Component.
///
/// Lifecycle: (`handle_intent` | `update` | `render`)*
pub trait Component: Send {
    /// Handle a screen-scoped key intent. Return an Action to dispatch, or None.
    fn handle_intent(&mut self, _intent: Intent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// The table region that filters and row selection apply to.
    fn focused_region(&self) -> Option<Region> {
        None
    }

    /// Set focus state.
    fn set_focused(&mut self, _focused: bool) {}

    fn id(&self) -> ScreenId;
}
