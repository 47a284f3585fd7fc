//! Key bindings.
//!
//! Every key the TUI reacts to outside of text input and dialogs is
//! listed in [`BINDINGS`]. The help overlay is generated from the same
//! table, so a binding cannot exist without being documented.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::screen::ScreenId;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Quit,
    ToggleHelp,
    RefreshAll,
    Screen(ScreenId),
    NextScreen,
    PrevScreen,
    NextPanel,
    PrevPanel,
    Down,
    Up,
    Top,
    Bottom,
    Search,
    ClearFilter,
    Retry,
    Delete,
    Dismiss,
}

impl Intent {
    /// Whether the app handles this intent itself rather than the screen.
    pub fn is_global(self) -> bool {
        !matches!(
            self,
            Self::NextPanel
                | Self::PrevPanel
                | Self::Down
                | Self::Up
                | Self::Top
                | Self::Bottom
                | Self::Retry
                | Self::Delete
        )
    }
}

#[derive(Debug)]
pub struct Binding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub intent: Intent,
    /// Key label for the help overlay.
    pub keys: &'static str,
    pub help: &'static str,
}

const fn bind(code: KeyCode, intent: Intent, keys: &'static str, help: &'static str) -> Binding {
    Binding {
        code,
        modifiers: KeyModifiers::NONE,
        intent,
        keys,
        help,
    }
}

const fn ctrl(code: KeyCode, intent: Intent, keys: &'static str, help: &'static str) -> Binding {
    Binding {
        code,
        modifiers: KeyModifiers::CONTROL,
        intent,
        keys,
        help,
    }
}

pub static BINDINGS: &[Binding] = &[
    // Navigation
    bind(KeyCode::Char('1'), Intent::Screen(ScreenId::Dashboard), "1-3", "Jump to page"),
    bind(KeyCode::Char('2'), Intent::Screen(ScreenId::Mitigations), "1-3", "Jump to page"),
    bind(KeyCode::Char('3'), Intent::Screen(ScreenId::Intents), "1-3", "Jump to page"),
    bind(KeyCode::Tab, Intent::NextScreen, "Tab", "Next page"),
    bind(KeyCode::BackTab, Intent::PrevScreen, "S-Tab", "Previous page"),
    bind(KeyCode::Char('l'), Intent::NextPanel, "h/l ←/→", "Focus panel"),
    bind(KeyCode::Right, Intent::NextPanel, "h/l ←/→", "Focus panel"),
    bind(KeyCode::Char('h'), Intent::PrevPanel, "h/l ←/→", "Focus panel"),
    bind(KeyCode::Left, Intent::PrevPanel, "h/l ←/→", "Focus panel"),
    bind(KeyCode::Char('j'), Intent::Down, "j/k ↓/↑", "Move down/up"),
    bind(KeyCode::Down, Intent::Down, "j/k ↓/↑", "Move down/up"),
    bind(KeyCode::Char('k'), Intent::Up, "j/k ↓/↑", "Move down/up"),
    bind(KeyCode::Up, Intent::Up, "j/k ↓/↑", "Move down/up"),
    bind(KeyCode::Char('g'), Intent::Top, "g/G", "Top / bottom"),
    bind(KeyCode::Home, Intent::Top, "g/G", "Top / bottom"),
    bind(KeyCode::Char('G'), Intent::Bottom, "g/G", "Top / bottom"),
    bind(KeyCode::End, Intent::Bottom, "g/G", "Top / bottom"),
    // Data
    bind(KeyCode::Char('R'), Intent::RefreshAll, "R", "Refresh everything now"),
    bind(KeyCode::F(5), Intent::RefreshAll, "R", "Refresh everything now"),
    bind(KeyCode::Char('r'), Intent::Retry, "r", "Retry failed panel"),
    bind(KeyCode::Char('/'), Intent::Search, "/", "Filter focused table"),
    bind(KeyCode::Char('c'), Intent::ClearFilter, "c", "Clear filter"),
    bind(KeyCode::Char('d'), Intent::Delete, "d", "Delete selected intent"),
    bind(KeyCode::Delete, Intent::Delete, "d", "Delete selected intent"),
    // Global
    bind(KeyCode::Char('x'), Intent::Dismiss, "x", "Dismiss notification"),
    bind(KeyCode::Esc, Intent::Dismiss, "x", "Dismiss notification"),
    bind(KeyCode::Char('?'), Intent::ToggleHelp, "?", "This help"),
    bind(KeyCode::Char('q'), Intent::Quit, "q", "Quit"),
    ctrl(KeyCode::Char('c'), Intent::Quit, "q", "Quit"),
];

/// Find the intent bound to `key`.
///
/// Shift is ignored: it is already folded into the character (`G`) or
/// the key code (`BackTab`), and terminals disagree about reporting it.
pub fn lookup(key: KeyEvent) -> Option<Intent> {
    let modifiers = key.modifiers.difference(KeyModifiers::SHIFT);
    BINDINGS
        .iter()
        .find(|b| b.code == key.code && b.modifiers == modifiers)
        .map(|b| b.intent)
}

/// One entry per help line, in table order.
pub fn help_entries() -> Vec<&'static Binding> {
    let mut out: Vec<&'static Binding> = Vec::new();
    for binding in BINDINGS {
        if !out.iter().any(|b| b.help == binding.help) {
            out.push(binding);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_keys_resolve() {
        assert_eq!(lookup(key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(Intent::Quit));
        assert_eq!(
            lookup(key(KeyCode::Char('2'), KeyModifiers::NONE)),
            Some(Intent::Screen(ScreenId::Mitigations))
        );
        assert_eq!(lookup(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_clears() {
        assert_eq!(lookup(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Intent::Quit));
        assert_eq!(
            lookup(key(KeyCode::Char('c'), KeyModifiers::NONE)),
            Some(Intent::ClearFilter)
        );
    }

    #[test]
    fn shift_is_ignored() {
        assert_eq!(lookup(key(KeyCode::Char('G'), KeyModifiers::SHIFT)), Some(Intent::Bottom));
        assert_eq!(lookup(key(KeyCode::BackTab, KeyModifiers::SHIFT)), Some(Intent::PrevScreen));
        assert_eq!(lookup(key(KeyCode::Char('R'), KeyModifiers::SHIFT)), Some(Intent::RefreshAll));
    }

    #[test]
    fn no_key_is_bound_twice() {
        for (i, a) in BINDINGS.iter().enumerate() {
            for b in &BINDINGS[i + 1..] {
                assert!(
                    !(a.code == b.code && a.modifiers == b.modifiers),
                    "{:?} bound twice",
                    a.code
                );
            }
        }
    }

    #[test]
    fn every_screen_has_a_number_key() {
        for id in ScreenId::ALL {
            let digit = char::from(b'0' + id.number());
            assert_eq!(
                lookup(key(KeyCode::Char(digit), KeyModifiers::NONE)),
                Some(Intent::Screen(id))
            );
        }
    }

    #[test]
    fn help_lists_each_line_once() {
        let entries = help_entries();
        assert_eq!(entries.first().map(|b| b.help), Some("Jump to page"));
        assert_eq!(entries.iter().filter(|b| b.help == "Quit").count(), 1);
        assert!(entries.len() < BINDINGS.len());
    }

    #[test]
    fn row_motion_is_screen_scoped() {
        assert!(!Intent::Down.is_global());
        assert!(!Intent::Delete.is_global());
        assert!(Intent::Search.is_global());
        assert!(Intent::Screen(ScreenId::Intents).is_global());
    }
}
