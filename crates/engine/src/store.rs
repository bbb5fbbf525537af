//! Record store: the single owner of the expense collection.
//!
//! Every mutation writes the whole collection through to the storage slot
//! before the in-memory state changes, so a failed write leaves the store
//! exactly as it was.

use uuid::Uuid;

use crate::{
    EngineError, Expense, ExpenseCmd, ResultEngine, storage::Storage, view::sorted_indices,
};

#[derive(Debug)]
pub struct ExpenseStore<S> {
    storage: S,
    expenses: Vec<Expense>,
}

/// Reads and validates the collection held by `storage`.
///
/// An empty slot yields an empty collection. A payload that does not parse,
/// or holds a record with a non-positive amount, is reported as
/// [`EngineError::CorruptStorage`].
pub fn load_expenses<S: Storage + ?Sized>(storage: &S) -> ResultEngine<Vec<Expense>> {
    let Some(payload) = storage.read()? else {
        return Ok(Vec::new());
    };
    if payload.trim().is_empty() {
        return Ok(Vec::new());
    }

    let expenses: Vec<Expense> = serde_json::from_str(&payload)
        .map_err(|err| EngineError::CorruptStorage(err.to_string()))?;
    for (position, expense) in expenses.iter().enumerate() {
        expense
            .validate()
            .map_err(|err| EngineError::CorruptStorage(format!("record {position}: {err}")))?;
    }
    Ok(expenses)
}

impl<S: Storage> ExpenseStore<S> {
    /// Opens the store. Unreadable or corrupt data yields an empty collection.
    pub fn open(storage: S) -> Self {
        let expenses = match load_expenses(&storage) {
            Ok(expenses) => expenses,
            Err(err) => {
                tracing::warn!("discarding stored expenses: {err}");
                Vec::new()
            }
        };
        tracing::debug!("loaded {} expenses", expenses.len());
        Self { storage, expenses }
    }

    /// Records in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Appends a new expense and persists. Returns the new record id.
    pub fn add(&mut self, cmd: ExpenseCmd) -> ResultEngine<Uuid> {
        let expense = Expense::new(cmd.date, cmd.category, cmd.amount, &cmd.note);
        expense.validate()?;

        let id = expense.id;
        let mut next = self.expenses.clone();
        next.push(expense);
        self.commit(next)?;
        tracing::debug!("added expense {id}");
        Ok(id)
    }

    /// Removes the expense with the given id and persists.
    pub fn remove(&mut self, id: Uuid) -> ResultEngine<Expense> {
        let position = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;

        let mut next = self.expenses.clone();
        let removed = next.remove(position);
        self.commit(next)?;
        tracing::debug!("removed expense {id}");
        Ok(removed)
    }

    /// Removes the expense shown at `position` of the date-descending view.
    pub fn remove_at(&mut self, position: usize) -> ResultEngine<Expense> {
        let index = sorted_indices(&self.expenses)
            .get(position)
            .copied()
            .ok_or_else(|| EngineError::KeyNotFound(format!("position {position}")))?;
        let id = self.expenses[index].id;
        self.remove(id)
    }

    /// Empties the collection and the storage slot.
    pub fn clear(&mut self) -> ResultEngine<()> {
        self.storage.remove()?;
        let count = self.expenses.len();
        self.expenses.clear();
        tracing::debug!("cleared {count} expenses");
        Ok(())
    }

    fn commit(&mut self, next: Vec<Expense>) -> ResultEngine<()> {
        let payload = serde_json::to_string(&next)?;
        self.storage.write(&payload)?;
        self.expenses = next;
        Ok(())
    }
}
