//! Screen identifier enum.

use std::fmt;

use ibidash_core::Page;

/// Identifies each primary TUI screen, navigable by number keys.
///
/// Screens map one-to-one onto the dashboard's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Mitigations, // 2
    Intents,     // 3
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 3] = [Self::Dashboard, Self::Mitigations, Self::Intents];

    /// Numeric key (1-3) for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Mitigations => 2,
            Self::Intents => 3,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Mitigations => "Mitigations",
            Self::Intents => "Intents",
        }
    }

    pub fn page(self) -> Page {
        match self {
            Self::Dashboard => Page::Dashboard,
            Self::Mitigations => Page::Mitigations,
            Self::Intents => Page::Intents,
        }
    }
}

impl From<Page> for ScreenId {
    fn from(page: Page) -> Self {
        match page {
            Page::Dashboard => Self::Dashboard,
            Page::Mitigations => Self::Mitigations,
            Page::Intents => Self::Intents,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn numbers_follow_tab_order() {
        let numbers: Vec<u8> = ScreenId::ALL.iter().map(|id| id.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Intents.next(), ScreenId::Dashboard);
        assert_eq!(ScreenId::Dashboard.prev(), ScreenId::Intents);
        assert_eq!(ScreenId::Dashboard.next(), ScreenId::Mitigations);
    }

    #[test]
    fn screens_map_onto_pages() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from(id.page()), id);
        }
        assert_eq!(ScreenId::default().page(), Page::default());
    }
}
