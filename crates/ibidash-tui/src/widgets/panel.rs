//! Paints one region's `PanelView`: tables, counter cards, the IBI
//! banner, scoped error panels and the loading state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

use ibidash_core::{AlertView, ApiSurface, CardView, CellView, ErrorView, FailureKind, PanelView, TableView};

use crate::theme;

/// Rounded panel block, highlighted when focused.
pub fn block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        })
}

/// Paint `view` inside a titled block.
///
/// `selected` is the highlighted record row for tables.
pub fn render_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    view: &PanelView,
    focused: bool,
    selected: Option<usize>,
) {
    match view {
        PanelView::Loading => render_message(frame, area, title, focused, "Loading\u{2026}"),
        PanelView::Table(table) => render_table(frame, area, title, table, focused, selected),
        PanelView::Cards(cards) => render_cards(frame, area, title, cards, focused),
        PanelView::Alert(alert) => render_alert(frame, area, alert),
        PanelView::Error(err) => render_error(frame, area, err, focused),
    }
}

/// A region whose resource the configured surface does not serve.
pub fn render_unavailable(frame: &mut Frame, area: Rect, title: &str, surface: ApiSurface) {
    let message = format!("Not available on the {surface} surface");
    render_message(frame, area, title, false, &message);
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, focused: bool, message: &str) {
    let block = block(title, focused);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_owned(),
        theme::placeholder(),
    )))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(paragraph, area);
}

// ── Tables ────────────────────────────────────────────────────────────

fn column_width(name: &str) -> Constraint {
    match name {
        "Description" | "Name" | "Hosts" | "Affected Hosts" | "Threat Type" | "Component" => {
            Constraint::Fill(2)
        }
        _ => Constraint::Fill(1),
    }
}

fn cell_style(cell: &CellView) -> Style {
    match (cell.class, cell.emphasis) {
        (Some(class), _) => theme::status_badge(class),
        (None, true) => Style::default()
            .fg(theme::NEON_CYAN)
            .add_modifier(Modifier::BOLD),
        (None, false) => Style::default(),
    }
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    table: &TableView,
    focused: bool,
    selected: Option<usize>,
) {
    let header = Row::new(
        table
            .columns
            .iter()
            .map(|c| Cell::from(*c).style(theme::table_header())),
    );

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            if row.is_placeholder() {
                let text = row.cells.first().map_or("", |c| c.text.as_str()).to_owned();
                return Row::new(vec![Cell::from(text)]).style(theme::placeholder());
            }
            Row::new(
                row.cells
                    .iter()
                    .map(|cell| Cell::from(cell.text.clone()).style(cell_style(cell))),
            )
            .style(theme::table_row())
        })
        .collect();

    let widths: Vec<Constraint> = table.columns.iter().map(|c| column_width(c)).collect();
    let has_records = table.records().next().is_some();

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block(title, focused))
        .row_highlight_style(theme::table_selected())
        .highlight_symbol("\u{25b8}");

    let mut state = TableState::default().with_selected(if focused && has_records {
        selected
    } else {
        None
    });
    frame.render_stateful_widget(widget, area, &mut state);
}

// ── Cards ─────────────────────────────────────────────────────────────

fn render_cards(frame: &mut Frame, area: Rect, title: &str, cards: &[CardView], focused: bool) {
    let lines: Vec<Line> = cards
        .iter()
        .map(|card| {
            Line::from(vec![
                Span::styled(
                    format!(" {:>6} ", card.value),
                    Style::default()
                        .fg(theme::tone_color(card.tone))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(card.label, theme::table_row()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block(title, focused)), area);
}

// ── IBI banner ────────────────────────────────────────────────────────

fn render_alert(frame: &mut Frame, area: Rect, alert: &AlertView) {
    let (style, border) = if alert.active {
        (
            Style::default()
                .fg(theme::ERROR_RED)
                .add_modifier(Modifier::BOLD),
            theme::border_error(),
        )
    } else {
        (Style::default().fg(theme::SUCCESS_GREEN), theme::border_default())
    };
    let text = if alert.active {
        format!("\u{26a0} {}", alert.message)
    } else {
        "IBI is running".to_owned()
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border),
        );
    frame.render_widget(paragraph, area);
}

// ── Errors ────────────────────────────────────────────────────────────

fn failure_label(kind: FailureKind) -> String {
    match kind {
        FailureKind::Transport => "connection failed".into(),
        FailureKind::Http(status) => format!("HTTP {status}"),
        FailureKind::Payload => "unexpected response".into(),
        FailureKind::Config => "configuration".into(),
    }
}

fn render_error(frame: &mut Frame, area: Rect, err: &ErrorView, focused: bool) {
    let block = Block::default()
        .title(format!(" {} ", err.title))
        .title_style(
            Style::default()
                .fg(theme::ERROR_RED)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_error()
        });

    let lines = vec![
        Line::from(Span::styled(
            err.message.clone(),
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(vec![
            Span::styled(format!("[{}] ", failure_label(err.kind)), theme::key_hint()),
            Span::styled(err.detail.clone(), theme::key_hint()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("r ", theme::key_hint_key()),
            Span::styled(format!("retry {}", err.retry), theme::key_hint()),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn http_failures_show_the_status() {
        assert_eq!(failure_label(FailureKind::Http(503)), "HTTP 503");
        assert_eq!(failure_label(FailureKind::Transport), "connection failed");
    }

    #[test]
    fn wide_columns_get_more_room() {
        assert_eq!(column_width("Description"), Constraint::Fill(2));
        assert_eq!(column_width("ID"), Constraint::Fill(1));
    }
}
