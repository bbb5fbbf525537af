use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::Confirm,
    ui::{components::centered_rect, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, confirm: Option<Confirm>, theme: &Theme) {
    let Some(confirm) = confirm else {
        return;
    };
    let question = match confirm {
        Confirm::DeleteAll => "¿Seguro que quieres borrar todos los gastos?",
    };

    let popup = centered_rect(50, 25, area);
    let lines = vec![
        Line::from(Span::styled(
            question,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.error)),
            Span::raw(" borrar  "),
            Span::styled("cualquier tecla", Style::default().fg(theme.accent)),
            Span::raw(" cancelar"),
        ]),
    ];

    let block = Block::default()
        .title(" Confirmar ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error))
        .style(Style::default().bg(theme.panel));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}
