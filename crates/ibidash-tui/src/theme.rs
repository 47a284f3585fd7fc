//! Palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use ibidash_core::{StatusClass, Tone};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29
pub const LIGHT_BLUE: Color = Color::Rgb(139, 233, 253); // #8be9fd
pub const ORANGE: Color = Color::Rgb(255, 184, 108); // #ffb86c

// ── Status badges ─────────────────────────────────────────────────────

/// Badge color for a status class.
pub fn status_color(class: StatusClass) -> Color {
    match class {
        StatusClass::Fulfilled
        | StatusClass::Mitigated
        | StatusClass::Completed
        | StatusClass::Online => SUCCESS_GREEN,
        StatusClass::NotFulfilled | StatusClass::Offline | StatusClass::Reincident => ERROR_RED,
        StatusClass::Detected | StatusClass::New => CORAL,
        StatusClass::UnderEmulation | StatusClass::Processing => LIGHT_BLUE,
        StatusClass::UnderMitigation | StatusClass::InProgress => ORANGE,
        StatusClass::Pending => BORDER_GRAY,
    }
}

pub fn status_badge(class: StatusClass) -> Style {
    Style::default()
        .fg(status_color(class))
        .add_modifier(Modifier::BOLD)
}

/// Accent color for a counter card.
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Primary => ELECTRIC_PURPLE,
        Tone::Success => SUCCESS_GREEN,
        Tone::Warning => ELECTRIC_YELLOW,
        Tone::Danger => ERROR_RED,
        Tone::Info => LIGHT_BLUE,
    }
}

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Border for a panel showing a load failure.
pub fn border_error() -> Style {
    Style::default().fg(ERROR_RED)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Placeholder rows ("No intents found").
pub fn placeholder() -> Style {
    Style::default()
        .fg(BORDER_GRAY)
        .add_modifier(Modifier::ITALIC)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}
