//! Places a [`Report`] on A4 pages.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner. Text
//! widths are estimated from average Helvetica glyph widths, which is close
//! enough for centering and for clipping long notes.

use crate::{Rgb, report::Report};

use super::{HEADERS, TOTALS_HEADING};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 40.0;
/// Lowest baseline any item may use.
pub const BOTTOM: f32 = 50.0;

const TOP: f32 = PAGE_HEIGHT - MARGIN;
const TABLE_START: f32 = 730.0;
const ROW_HEIGHT: f32 = 18.0;
const TABLE_FONT: f32 = 10.0;
const TOTALS_FONT: f32 = 14.0;
const TOTALS_STEP: f32 = 23.0;
const GRAND_TOTAL_FONT: f32 = 18.0;

/// Column left edges and widths: date, category, amount, note.
const COLUMNS: [(f32, f32); 4] = [(40.0, 80.0), (120.0, 110.0), (230.0, 90.0), (320.0, 235.0)];

const BLACK: Rgb = Rgb(0, 0, 0);
const WHITE: Rgb = Rgb(255, 255, 255);
const GRID: Rgb = Rgb(190, 190, 190);
const HEADER_FILL: Rgb = Rgb(0, 128, 128);
const GRAND_TOTAL_COLOR: Rgb = Rgb(255, 165, 0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub font: Font,
    pub color: Rgb,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Text(Text),
    Fill { x: f32, y: f32, w: f32, h: f32, color: Rgb },
    Stroke { x: f32, y: f32, w: f32, h: f32, color: Rgb },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Item>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.items.iter().filter_map(|item| match item {
            Item::Text(text) => Some(text),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub pages: Vec<Page>,
}

impl Layout {
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.pages.iter().flat_map(Page::texts)
    }
}

/// Estimated rendered width of `text`.
pub fn text_width(text: &str, size: f32, font: Font) -> f32 {
    let em = match font {
        Font::Regular => 0.5,
        Font::Bold => 0.55,
    };
    text.chars().count() as f32 * size * em
}

/// Cuts `text` so it fits in `width`, marking the cut with `...`.
fn clip(text: &str, width: f32, size: f32) -> String {
    if text_width(text, size, Font::Regular) <= width {
        return text.to_string();
    }
    let max_chars = (width / (size * 0.5)) as usize;
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = TOP;
    }

    /// Starts a new page unless `height` more points fit above the bottom.
    /// Returns `true` if it broke the page.
    fn ensure(&mut self, height: f32) -> bool {
        if self.y - height < BOTTOM {
            self.new_page();
            return true;
        }
        false
    }

    fn text(&mut self, x: f32, size: f32, font: Font, color: Rgb, text: impl Into<String>) {
        let y = self.y;
        self.page().items.push(Item::Text(Text {
            x,
            y,
            size,
            font,
            color,
            text: text.into(),
        }));
    }

    fn centered(&mut self, size: f32, font: Font, color: Rgb, text: &str) {
        let x = ((PAGE_WIDTH - text_width(text, size, font)) / 2.0).max(MARGIN);
        self.text(x, size, font, color, text);
    }

    fn header_row(&mut self) {
        let top = self.y;
        let (first_x, _) = COLUMNS[0];
        let (last_x, last_w) = COLUMNS[3];
        self.page().items.push(Item::Fill {
            x: first_x,
            y: top - ROW_HEIGHT,
            w: last_x + last_w - first_x,
            h: ROW_HEIGHT,
            color: HEADER_FILL,
        });
        self.y = top - 13.0;
        for ((x, _), header) in COLUMNS.iter().zip(HEADERS) {
            self.text(x + 4.0, TABLE_FONT, Font::Bold, WHITE, header);
        }
        self.y = top - ROW_HEIGHT;
    }

    fn body_row(&mut self, cells: [&str; 4]) {
        let top = self.y;
        for (x, w) in COLUMNS {
            self.page().items.push(Item::Stroke {
                x,
                y: top - ROW_HEIGHT,
                w,
                h: ROW_HEIGHT,
                color: GRID,
            });
        }
        self.y = top - 13.0;
        for ((x, w), cell) in COLUMNS.into_iter().zip(cells) {
            let clipped = clip(cell, w - 8.0, TABLE_FONT);
            self.text(x + 4.0, TABLE_FONT, Font::Regular, BLACK, clipped);
        }
        self.y = top - ROW_HEIGHT;
    }
}

/// Lays out the report: title block, table (header repeated on every page),
/// category totals and the emphasized grand total.
pub fn layout(report: &Report) -> Layout {
    let mut cursor = Cursor {
        pages: vec![Page::default()],
        y: PAGE_HEIGHT - 57.0,
    };

    cursor.centered(20.0, Font::Bold, BLACK, &report.title);
    cursor.y = PAGE_HEIGHT - 85.0;
    cursor.centered(12.0, Font::Regular, BLACK, &report.subtitle);

    cursor.y = TABLE_START;
    cursor.header_row();
    for row in &report.rows {
        if cursor.ensure(ROW_HEIGHT) {
            cursor.header_row();
        }
        cursor.body_row(row.cells());
    }

    cursor.y -= 30.0;
    cursor.ensure(0.0);
    cursor.text(MARGIN, TOTALS_FONT, Font::Bold, BLACK, TOTALS_HEADING);

    for line in &report.category_lines {
        cursor.y -= TOTALS_STEP;
        cursor.ensure(0.0);
        cursor.text(MARGIN + 17.0, TOTALS_FONT, Font::Regular, BLACK, line.as_str());
    }

    cursor.y -= 35.0;
    cursor.ensure(0.0);
    cursor.centered(
        GRAND_TOTAL_FONT,
        Font::Bold,
        GRAND_TOTAL_COLOR,
        &report.grand_total_line,
    );

    Layout {
        pages: cursor.pages,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{Category, Expense, MoneyCents};

    fn report(count: usize) -> Report {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let expenses: Vec<Expense> = (0..count)
            .map(|i| Expense::new(date, Category::ALL[i % 7], MoneyCents::new(100 + i as i64), ""))
            .collect();
        Report::build(&expenses, date)
    }

    #[test]
    fn short_report_fits_one_page() {
        let layout = layout(&report(2));
        assert_eq!(layout.pages.len(), 1);
        let texts: Vec<&str> = layout.texts().map(|t| t.text.as_str()).collect();
        assert_eq!(texts[0], "Agenda de Gastos");
        assert!(texts.contains(&"Totales:"));
        assert_eq!(texts.last(), Some(&"Gran Total: 2.01 €"));
    }

    #[test]
    fn long_report_breaks_pages_and_repeats_header() {
        let layout = layout(&report(80));
        assert!(layout.pages.len() > 1);
        for page in &layout.pages[..layout.pages.len() - 1] {
            assert!(page.texts().any(|t| t.text == "Fecha"));
        }
        assert!(layout.texts().all(|t| t.y >= BOTTOM));
        let rows = layout
            .texts()
            .filter(|t| t.text.ends_with(" €") && !t.text.contains(':'))
            .count();
        assert_eq!(rows, 80);
    }

    #[test]
    fn grand_total_is_emphasized() {
        let layout = layout(&report(3));
        let total = layout.texts().last().unwrap();
        assert_eq!(total.font, Font::Bold);
        assert_eq!(total.color, GRAND_TOTAL_COLOR);
        assert!(total.size > TOTALS_FONT);
    }

    #[test]
    fn long_notes_are_clipped() {
        let clipped = clip(&"x".repeat(200), 227.0, TABLE_FONT);
        assert!(clipped.ends_with("..."));
        assert!(text_width(&clipped, TABLE_FONT, Font::Regular) <= 227.0);
    }
}
