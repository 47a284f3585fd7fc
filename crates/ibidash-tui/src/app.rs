//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use ibidash_core::{Dashboard, Region, RowFilter};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel, Toast};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::keymap::{self, Intent};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    dashboard: Dashboard,
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Filter prompt visibility.
    search_active: bool,
    search_query: String,
    /// Region the open filter prompt applies to.
    search_region: Option<Region>,
    last_refresh: Option<DateTime<Local>>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    toast: Option<Toast>,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(dashboard.config().surface).into_iter().collect();

        Self {
            dashboard,
            active_screen: ScreenId::default(),
            screens,
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            search_region: None,
            last_refresh: None,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            toast: None,
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }

        let dashboard = self.dashboard.clone();
        let cancel = self.data_cancel.clone();
        let tx = self.action_tx.clone();
        let bridge = tokio::spawn(async move {
            crate::data_bridge::spawn_data_bridge(dashboard, tx, cancel).await;
        });

        let mut events = EventReader::spawn();

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render | Event::Resize => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Let the bridge stop the dashboard before the runtime goes away
        self.data_cancel.cancel();
        events.stop();
        if let Err(e) = bridge.await {
            warn!(error = %e, "data bridge task failed");
        }
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Dialogs and the filter prompt
    /// capture input first; everything else goes through the key table.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.search_active {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::CloseSearch),
                KeyCode::Enter => Some(Action::SearchSubmit),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Some(Action::SearchInput(self.search_query.clone()))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Some(Action::SearchInput(self.search_query.clone()))
                }
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let Some(intent) = keymap::lookup(key) else {
            return Ok(None);
        };
        if intent.is_global() {
            return Ok(self.global_action(intent));
        }
        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_intent(intent),
            None => Ok(None),
        }
    }

    fn global_action(&self, intent: Intent) -> Option<Action> {
        let action = match intent {
            Intent::Quit => Action::Quit,
            Intent::ToggleHelp => Action::ToggleHelp,
            Intent::RefreshAll => Action::RefreshAll,
            Intent::Screen(id) => Action::SwitchScreen(id),
            Intent::NextScreen => Action::SwitchScreen(self.active_screen.next()),
            Intent::PrevScreen => Action::SwitchScreen(self.active_screen.prev()),
            Intent::Search => Action::OpenSearch,
            Intent::ClearFilter => Action::ClearFilter,
            Intent::Dismiss => Action::DismissNotification,
            _ => return None,
        };
        Some(action)
    }

    /// Process a single action: update app state and propagate to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Render => {}

            Action::Tick => {
                if self
                    .toast
                    .as_ref()
                    .is_some_and(|t| t.is_expired(Instant::now()))
                {
                    self.toast = None;
                }
            }

            // ── Navigation ───────────────────────────────────────────
            Action::SwitchScreen(target) => {
                if self.focus_screen(*target) {
                    let dashboard = self.dashboard.clone();
                    let page = target.page();
                    tokio::spawn(async move {
                        dashboard.select_page(page).await;
                    });
                }
            }

            Action::PageChanged(page) => {
                self.focus_screen(ScreenId::from(*page));
            }

            // ── Data ─────────────────────────────────────────────────
            Action::RegionUpdated(..) => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::LastRefresh(stamp) => {
                self.last_refresh = *stamp;
            }

            // ── Commands ─────────────────────────────────────────────
            Action::RefreshAll => {
                let dashboard = self.dashboard.clone();
                tokio::spawn(async move { dashboard.refresh_all().await });
            }

            Action::Retry(resource) => {
                debug!(%resource, "retry requested");
                let dashboard = self.dashboard.clone();
                let resource = *resource;
                tokio::spawn(async move { dashboard.load(resource).await });
            }

            Action::RequestDelete(id) => {
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::DeleteIntent { id: id.clone() }))?;
            }

            // ── Confirmation dialog ──────────────────────────────────
            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm);
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            // ── Filter ───────────────────────────────────────────────
            Action::OpenSearch => {
                let region = self
                    .screens
                    .get(&self.active_screen)
                    .and_then(|s| s.focused_region());
                if let Some(region) = region {
                    self.search_active = true;
                    self.search_query.clear();
                    self.search_region = Some(region);
                } else {
                    self.action_tx.send(Action::Notify(Notification::info(
                        "Nothing to filter on this page",
                    )))?;
                }
            }

            Action::SearchInput(query) => {
                if let Some(region) = self.search_region {
                    self.dashboard.set_filter(region, parse_filter(query));
                    self.push_view(region)?;
                }
            }

            Action::SearchSubmit => {
                self.search_active = false;
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
                if let Some(region) = self.search_region.take() {
                    self.dashboard.clear_filter(region);
                    self.push_view(region)?;
                }
            }

            Action::ClearFilter => {
                let region = self
                    .screens
                    .get(&self.active_screen)
                    .and_then(|s| s.focused_region());
                if let Some(region) = region {
                    self.dashboard.clear_filter(region);
                    self.push_view(region)?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            // ── Notifications ────────────────────────────────────────
            Action::Notify(n) => {
                self.toast = Some(Toast::new(n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.toast = None;
            }
        }
        Ok(())
    }

    /// Make `target` the active screen. Returns whether it changed.
    fn focus_screen(&mut self, target: ScreenId) -> bool {
        if target == self.active_screen {
            return false;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&target) {
            debug!(screen = %screen.id(), "switched screen");
            screen.set_focused(true);
        }
        true
    }

    /// Re-send a region's filtered view so its screen repaints.
    fn push_view(&self, region: Region) -> Result<()> {
        let view = Arc::new(self.dashboard.view(region));
        self.action_tx.send(Action::RegionUpdated(region, view))?;
        Ok(())
    }

    // ── Command execution ─────────────────────────────────────────

    fn execute_confirm(&self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteIntent { id } => {
                // The outcome comes back through the dashboard's notices.
                let dashboard = self.dashboard.clone();
                tokio::spawn(async move {
                    let _ = dashboard.delete_intent(&id).await;
                });
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }
        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        // Overlays, last = topmost
        if let Some(toast) = &self.toast {
            render_notification(frame, area, &toast.notification);
        }
        if let Some(confirm) = &self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    /// Surface, refresh cadence, last refresh, active filter, key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let line = Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::ELECTRIC_PURPLE)),
                Span::styled(&self.search_query, Style::default().fg(theme::NEON_CYAN)),
                Span::styled("\u{2588}", Style::default().fg(theme::NEON_CYAN)),
                Span::styled("  Esc clear  Enter keep  col=value matches a column", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let config = self.dashboard.config();
        let cadence = if config.refresh_interval.is_zero() {
            "auto-refresh off".to_owned()
        } else {
            format!("every {}", humantime::format_duration(config.refresh_interval))
        };
        let refreshed = self.last_refresh.map_or_else(
            || "never".to_owned(),
            |t| t.format("%H:%M:%S").to_string(),
        );

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(
                format!("\u{25cf} {}", config.surface),
                Style::default().fg(theme::SUCCESS_GREEN),
            ),
            Span::styled(format!("  {cadence}"), theme::tab_inactive()),
            Span::styled(format!("  last refresh {refreshed}"), theme::tab_inactive()),
        ];

        let filter = self
            .screens
            .get(&self.active_screen)
            .and_then(|s| s.focused_region())
            .and_then(|r| self.dashboard.navigator().filter(r));
        if let Some(filter) = filter {
            spans.push(Span::styled(
                format!("  filter: {}", describe_filter(&filter)),
                Style::default().fg(theme::ELECTRIC_YELLOW),
            ));
        }

        spans.push(Span::styled(
            " \u{2502} ? help  R refresh  q quit",
            theme::key_hint(),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Parse the filter prompt: `column=value` matches one column, anything
/// else is a substring search across every cell.
fn parse_filter(input: &str) -> RowFilter {
    match input.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => RowFilter::Column {
            column: column.trim().to_owned(),
            value: value.trim().to_owned(),
        },
        _ => RowFilter::Text(input.to_owned()),
    }
}

fn describe_filter(filter: &RowFilter) -> String {
    match filter {
        RowFilter::Column { column, value } => format!("{column}={value}"),
        RowFilter::Text(needle) => format!("\"{needle}\""),
    }
}

// ── Overlays ──────────────────────────────────────────────────────────

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x + x, area.y + y, width, height)
}

/// Help overlay built from the key table.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let entries = keymap::help_entries();
    let height = u16::try_from(entries.len()).unwrap_or(u16::MAX).saturating_add(4);
    let help_area = centered(area, 52, height);

    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_DARK)),
        help_area,
    );

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused());
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let mut lines = vec![Line::from("")];
    lines.extend(entries.iter().map(|b| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", b.keys), theme::key_hint_key()),
            Span::styled(b.help, theme::key_hint()),
        ])
    }));
    lines.push(Line::from(Span::styled(
        "                     Esc or ? to close",
        theme::key_hint(),
    )));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let dialog_area = centered(area, 50, 5);

    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_DARK)),
        dialog_area,
    );

    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::ELECTRIC_YELLOW));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let text = vec![
        Line::from(Span::styled(
            format!("  {confirm}"),
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("confirm    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

/// Toast in the bottom-right corner, above the tab and status bars.
fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
    let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
    let height = 3u16;
    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2);
    let toast_area = Rect::new(area.x + x, area.y + y, width, height.min(area.height));

    let (border_color, icon) = match notif.level {
        NotificationLevel::Success => (theme::SUCCESS_GREEN, "\u{2713}"),
        NotificationLevel::Error => (theme::ERROR_RED, "\u{2717}"),
        NotificationLevel::Info => (theme::NEON_CYAN, "\u{b7}"),
    };

    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_DARK)),
        toast_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
        Span::styled(&notif.message, Style::default().fg(theme::DIM_WHITE)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
