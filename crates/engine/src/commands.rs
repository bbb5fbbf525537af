//! Command structs for engine operations.
//!
//! These types group the parameters of a write, keeping call sites readable
//! and moving raw-input parsing out of the front ends.

use chrono::NaiveDate;

use crate::{Category, MoneyCents, ResultEngine, entry::parse_date};

/// Record a new expense.
///
/// The amount is not checked here: [`crate::Engine::add_expense`] rejects
/// non-positive amounts before anything is stored.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: MoneyCents,
    pub note: String,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(date: NaiveDate, category: Category, amount: MoneyCents) -> Self {
        Self {
            date,
            category,
            amount,
            note: String::new(),
        }
    }

    /// Builds a command from raw user input (date, category label, amount).
    pub fn parse(date: &str, category: &str, amount: &str) -> ResultEngine<Self> {
        Ok(Self::new(
            parse_date(date)?,
            category.parse()?,
            amount.parse()?,
        ))
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}
