//! Date-descending list of expenses, as shown to the user.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Category, Expense, MoneyCents};

/// Shown instead of the list when there is nothing to show.
pub const EMPTY_PLACEHOLDER: &str = "No hay gastos registrados aún.";

/// Indices into `expenses` ordered by date, newest first.
///
/// Expenses sharing a date keep their insertion order.
pub fn sorted_indices(expenses: &[Expense]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..expenses.len()).collect();
    indices.sort_by(|a, b| expenses[*b].date.cmp(&expenses[*a].date));
    indices
}

/// One row of the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRow<'a> {
    /// Handle to delete this row.
    pub id: Uuid,
    pub date: NaiveDate,
    pub category: Category,
    pub amount: MoneyCents,
    pub note: Option<&'a str>,
}

impl ListRow<'_> {
    /// Row text without the note: `2024-01-06 — Comidas: 15.50 €`.
    pub fn headline(&self) -> String {
        format!("{} — {}: {}", self.date, self.category, self.amount)
    }
}

/// The rendered list: a placeholder or the sorted rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListView<'a> {
    Empty,
    Rows(Vec<&'a Expense>),
}

impl<'a> ListView<'a> {
    pub fn build(expenses: &'a [Expense]) -> Self {
        if expenses.is_empty() {
            return ListView::Empty;
        }
        let rows = sorted_indices(expenses)
            .into_iter()
            .map(|i| &expenses[i])
            .collect();
        ListView::Rows(rows)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty)
    }

    pub fn len(&self) -> usize {
        match self {
            ListView::Empty => 0,
            ListView::Rows(rows) => rows.len(),
        }
    }

    /// Placeholder text, if the view is empty.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_PLACEHOLDER)
    }

    /// Rows in display order. Can be called any number of times.
    pub fn iter(&self) -> impl Iterator<Item = ListRow<'a>> + '_ {
        let rows: &[&'a Expense] = match self {
            ListView::Empty => &[],
            ListView::Rows(rows) => rows,
        };
        rows.iter().copied().map(|expense: &'a Expense| ListRow {
            id: expense.id,
            date: expense.date,
            category: expense.category,
            amount: expense.amount,
            note: expense.note(),
        })
    }

    /// Delete handle of the row at `position`.
    pub fn id_at(&self, position: usize) -> Option<Uuid> {
        match self {
            ListView::Empty => None,
            ListView::Rows(rows) => rows.get(position).map(|e| e.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(day: u32, cents: i64) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            Category::Varios,
            MoneyCents::new(cents),
            "",
        )
    }

    #[test]
    fn empty_shows_placeholder() {
        let view = ListView::build(&[]);
        assert_eq!(view.placeholder(), Some(EMPTY_PLACEHOLDER));
        assert_eq!(view.iter().count(), 0);
    }

    #[test]
    fn newest_first_and_stable_on_ties() {
        let expenses = vec![expense(5, 1), expense(7, 2), expense(5, 3), expense(6, 4)];
        let view = ListView::build(&expenses);
        let amounts: Vec<i64> = view.iter().map(|r| r.amount.cents()).collect();
        assert_eq!(amounts, vec![2, 4, 1, 3]);
        // restartable
        assert_eq!(view.iter().count(), 4);
    }

    #[test]
    fn sorting_is_idempotent() {
        let expenses = vec![expense(3, 1), expense(9, 2), expense(3, 3), expense(1, 4)];
        let once: Vec<Expense> = sorted_indices(&expenses)
            .into_iter()
            .map(|i| expenses[i].clone())
            .collect();
        let twice: Vec<Expense> = sorted_indices(&once)
            .into_iter()
            .map(|i| once[i].clone())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn headline_and_note() {
        let mut lunch = expense(6, 1550);
        lunch.category = Category::Comidas;
        lunch.note = "lunch".to_string();
        let expenses = vec![lunch];
        let view = ListView::build(&expenses);
        let row = view.iter().next().unwrap();
        assert_eq!(row.headline(), "2024-01-06 — Comidas: 15.50 €");
        assert_eq!(row.note, Some("lunch"));
        assert_eq!(view.id_at(0), Some(expenses[0].id));
        assert_eq!(view.id_at(1), None);
    }
}
