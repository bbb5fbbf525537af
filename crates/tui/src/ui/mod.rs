pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::ListView;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState, list: &ListView<'_>) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    // info bar, content, hints
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, list, &theme);
    screens::dashboard::render(frame, layout[1], state, list, &theme);
    render_bottom_bar(frame, layout[2], state, &theme);

    components::confirm::render(frame, area, state.confirm, &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_info_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    list: &ListView<'_>,
    theme: &Theme,
) {
    let line = Line::from(vec![
        Span::styled(
            engine::report::TITLE,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Gastos", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", list.len())),
        Span::styled("Total", Style::default().fg(theme.dim)),
        Span::styled(
            format!(": {}", state.totals.grand_total()),
            Style::default().fg(theme.emphasis),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = components::hints::for_focus(state.focus);
    let mut parts = components::hints::hints_to_spans(&hints, theme);
    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("Ctrl+C", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" salir"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
