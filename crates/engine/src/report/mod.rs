//! Printable summary of the expenses.
//!
//! [`Report::build`] is pure: it snapshots the records in insertion order and
//! recomputes the totals on its own. [`layout`] places it on pages and
//! [`pdf`] turns the layout into bytes.

use chrono::NaiveDate;

use crate::{Expense, Totals};

pub mod layout;
pub mod pdf;

pub const TITLE: &str = "Agenda de Gastos";
pub const HEADERS: [&str; 4] = ["Fecha", "Categoría", "Monto", "Descripción"];
pub const TOTALS_HEADING: &str = "Totales:";
/// Stands in for an empty note.
pub const NO_NOTE: &str = "-";

/// One table row, already formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

impl ReportRow {
    pub fn cells(&self) -> [&str; 4] {
        [&self.date, &self.category, &self.amount, &self.note]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub subtitle: String,
    pub rows: Vec<ReportRow>,
    /// `Comidas: 15.50 €`, one per category with spending.
    pub category_lines: Vec<String>,
    /// `Gran Total: 55.50 €`.
    pub grand_total_line: String,
    pub totals: Totals,
}

impl Report {
    pub fn build(expenses: &[Expense], generated_on: NaiveDate) -> Self {
        let totals = Totals::from_expenses(expenses);

        let rows = expenses
            .iter()
            .map(|e| ReportRow {
                date: e.date.format("%Y-%m-%d").to_string(),
                category: e.category.label().to_string(),
                amount: e.amount.to_string(),
                note: e.note().unwrap_or(NO_NOTE).to_string(),
            })
            .collect();

        let category_lines = totals
            .non_zero()
            .map(|(category, amount)| format!("{category}: {amount}"))
            .collect();

        Self {
            title: TITLE.to_string(),
            subtitle: format!("Generado el {}", generated_on.format("%d/%m/%Y")),
            rows,
            category_lines,
            grand_total_line: format!("Gran Total: {}", totals.grand_total()),
            totals,
        }
    }
}
