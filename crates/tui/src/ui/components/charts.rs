use engine::{ChartSet, MoneyCents, charts::RANKING_COLOR};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{
    components::card::Card,
    theme::{self, Theme},
};

/// A chart set as currently drawn.
#[derive(Debug)]
pub struct ChartInstance {
    generation: u64,
    charts: ChartSet,
}

impl ChartInstance {
    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    fn dispose(self) {
        tracing::debug!(generation = self.generation, "chart disposed");
    }
}

/// Holds the one live chart instance.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<ChartInstance>,
    generation: u64,
}

impl ChartSlot {
    /// Disposes the live instance, then installs one for `charts`.
    pub fn replace(&mut self, charts: ChartSet) {
        if let Some(previous) = self.current.take() {
            previous.dispose();
        }
        self.generation += 1;
        self.current = Some(ChartInstance {
            generation: self.generation,
            charts,
        });
    }

    pub fn current(&self) -> Option<&ChartInstance> {
        self.current.as_ref()
    }

    /// Number of instances built so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Proportional breakdown: one stacked bar plus a legend line per slice.
pub fn render_breakdown(frame: &mut Frame<'_>, area: Rect, charts: &ChartSet, theme: &Theme) {
    let card = Card::new("Por categoría", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let slices = &charts.breakdown.slices;
    if slices.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "Sin gastos",
            Style::default().fg(theme.dim),
        ));
        frame.render_widget(empty, inner);
        return;
    }

    let width = inner.width as usize;
    let shares: Vec<f64> = slices.iter().map(|s| s.share).collect();
    let stacked: Vec<Span<'static>> = stacked_widths(&shares, width)
        .into_iter()
        .zip(slices)
        .map(|(cells, slice)| {
            Span::styled(
                "█".repeat(cells),
                Style::default().fg(theme::color(slice.color)),
            )
        })
        .collect();

    let mut lines = vec![Line::from(stacked), Line::default()];
    lines.extend(slices.iter().map(|slice| {
        Line::from(vec![
            Span::styled("■ ", Style::default().fg(theme::color(slice.color))),
            Span::styled(slice.label(), Style::default().fg(theme.text)),
        ])
    }));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Ranking: horizontal bars, largest first.
pub fn render_ranking(frame: &mut Frame<'_>, area: Rect, charts: &ChartSet, theme: &Theme) {
    let card = Card::new("Ranking", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let bars = &charts.ranking.bars;
    if bars.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "Sin gastos",
            Style::default().fg(theme.dim),
        ));
        frame.render_widget(empty, inner);
        return;
    }

    let max = charts.ranking.max();
    let label_width = 10;
    let value_width = 12;
    let bar_width = (inner.width as usize).saturating_sub(label_width + value_width + 2);

    let lines: Vec<Line<'static>> = bars
        .iter()
        .map(|bar| {
            Line::from(vec![
                Span::styled(
                    format!("{:<label_width$}", bar.category.label()),
                    Style::default().fg(theme.text),
                ),
                Span::raw(" "),
                Span::styled(
                    ascii_bar(bar.amount, max, bar_width),
                    Style::default().fg(theme::color(RANKING_COLOR)),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:>value_width$}", bar.amount.to_string()),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Creates a simple ASCII-based horizontal bar for inline use.
///
/// Returns a string like `████████░░░░░░░░░░░░` representing the ratio.
#[must_use]
pub fn ascii_bar(value: MoneyCents, max: MoneyCents, width: usize) -> String {
    if !max.is_positive() {
        return "░".repeat(width);
    }

    let ratio = (value.cents() as f64 / max.cents() as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Splits `width` cells among percentage shares. Every slice gets at least
/// one cell when there is room for it; the cells always sum to `width`.
fn stacked_widths(shares: &[f64], width: usize) -> Vec<usize> {
    if shares.is_empty() || width == 0 {
        return vec![0; shares.len()];
    }

    let mut cells: Vec<usize> = shares
        .iter()
        .map(|share| ((share / 100.0) * width as f64).floor() as usize)
        .collect();
    if width >= shares.len() {
        for cell in cells.iter_mut() {
            *cell = (*cell).max(1);
        }
    }

    let used: usize = cells.iter().sum();
    if let Some(widest) = (0..cells.len()).max_by_key(|&i| cells[i]) {
        if used < width {
            cells[widest] += width - used;
        } else {
            cells[widest] = cells[widest].saturating_sub(used - width);
        }
    }
    cells
}
