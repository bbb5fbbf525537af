use engine::{ListView, Totals};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, Focus, FormField, FormState},
    ui::{
        components::{card::Card, charts},
        theme::Theme,
    },
};

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    list: &ListView<'_>,
    theme: &Theme,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    render_form(frame, left[0], state, theme);
    render_quick_add(frame, left[1], state, theme);
    render_list(frame, left[2], state, list, theme);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10),
            Constraint::Percentage(50),
            Constraint::Min(0),
        ])
        .split(columns[1]);

    render_totals(frame, right[0], &state.totals, theme);
    if let Some(instance) = state.charts.current() {
        charts::render_breakdown(frame, right[1], instance.charts(), theme);
        charts::render_ranking(frame, right[2], instance.charts(), theme);
    }
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Form;
    let lines: Vec<Line<'static>> = FormState::fields()
        .into_iter()
        .map(|field| form_line(&state.form, field, focused, theme))
        .collect();

    Card::new("Nuevo gasto", theme)
        .focused(focused)
        .render_with(frame, area, Paragraph::new(lines));
}

fn form_line(form: &FormState, field: FormField, focused: bool, theme: &Theme) -> Line<'static> {
    let active = focused && form.focus == field;
    let label_style = if active {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let value = match field {
        FormField::Category => format!("◀ {} ▶", form.value(field)),
        _ if active => format!("{}▏", form.value(field)),
        _ => form.value(field).to_string(),
    };

    Line::from(vec![
        Span::styled(format!("{:<12}", field.label()), label_style),
        Span::styled(value, Style::default().fg(theme.text)),
    ])
}

fn render_quick_add(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::QuickAdd;
    let content = if focused {
        Line::from(Span::styled(
            format!("{}▏", state.quick_add),
            Style::default().fg(theme.text),
        ))
    } else {
        Line::from(Span::styled(
            "15,50 #comidas menú",
            Style::default().fg(theme.dim),
        ))
    };

    Card::new("Rápido", theme)
        .focused(focused)
        .render_with(frame, area, Paragraph::new(content));
}

fn render_list(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    list: &ListView<'_>,
    theme: &Theme,
) {
    let focused = state.focus == Focus::List;
    let card = Card::new("Gastos", theme).focused(focused);

    if let Some(placeholder) = list.placeholder() {
        let empty = Paragraph::new(Span::styled(placeholder, Style::default().fg(theme.dim)));
        card.render_with(frame, area, empty);
        return;
    }

    let items: Vec<ListItem<'static>> = list
        .iter()
        .map(|row| {
            let mut spans = vec![
                Span::styled(
                    row.date.to_string(),
                    Style::default().fg(theme.dim),
                ),
                Span::raw(" — "),
                Span::styled(
                    format!("{}: ", row.category),
                    Style::default().fg(crate::ui::theme::color(row.category.color())),
                ),
                Span::styled(
                    row.amount.to_string(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
            ];
            if let Some(note) = row.note {
                spans.push(Span::styled(
                    format!("  {note}"),
                    Style::default().fg(theme.dim),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(state.selected));
    }

    let widget = List::new(items)
        .block(card.block())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(widget, area, &mut list_state);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, totals: &Totals, theme: &Theme) {
    let lines = totals_lines(totals, theme);
    Card::new("Totales", theme).render_with(frame, area, Paragraph::new(lines));
}

/// Categories with spending, then the grand total.
fn totals_lines(totals: &Totals, theme: &Theme) -> Vec<Line<'static>> {
    let text = Style::default().fg(theme.text);
    let mut lines: Vec<Line<'static>> = totals
        .non_zero()
        .map(|(category, amount)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", category.label()), text),
                Span::styled(format!("{:>12}", amount.to_string()), text),
            ])
        })
        .collect();

    let emphasis = Style::default()
        .fg(theme.emphasis)
        .add_modifier(Modifier::BOLD);
    lines.push(Line::from(vec![
        Span::styled(format!("{:<12}", "Gran Total"), emphasis),
        Span::styled(format!("{:>12}", totals.grand_total().to_string()), emphasis),
    ]));
    lines
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{Category, Expense, MoneyCents};

    use super::*;

    fn labels(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans[0].content.trim_end().to_string())
            .collect()
    }

    #[test]
    fn totals_panel_lists_only_categories_with_spending() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let totals = Totals::from_expenses(&[
            Expense::new(day, Category::Varios, MoneyCents::new(9_99), ""),
            Expense::new(day, Category::Hoteles, MoneyCents::new(120_00), ""),
        ]);
        let lines = totals_lines(&totals, &Theme::default());
        assert_eq!(labels(&lines), vec!["Hoteles", "Varios", "Gran Total"]);
        assert_eq!(lines[2].spans[1].content.trim_start(), "129.99 €");
    }

    #[test]
    fn empty_totals_panel_shows_grand_total_only() {
        let lines = totals_lines(&Totals::from_expenses(&[]), &Theme::default());
        assert_eq!(labels(&lines), vec!["Gran Total"]);
    }
}
