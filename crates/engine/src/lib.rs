//! Expense tracking engine.
//!
//! The [`Engine`] owns the record store. Every mutation persists first, then
//! rebuilds a [`Dashboard`] in a fixed order: list view, totals, charts.
//! Reports are built on demand from their own snapshot of the records.
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use uuid::Uuid;

pub use categories::{Category, Rgb};
pub use charts::{Bar, Breakdown, ChartSet, Ranking, Slice};
pub use commands::ExpenseCmd;
pub use entry::{Expense, parse_date};
pub use error::EngineError;
pub use export::ExportFormat;
pub use money::MoneyCents;
pub use report::Report;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{ExpenseStore, load_expenses};
pub use totals::Totals;
pub use view::{EMPTY_PLACEHOLDER, ListRow, ListView};

mod categories;
pub mod charts;
mod commands;
mod entry;
mod error;
pub mod export;
mod money;
pub mod report;
pub mod storage;
mod store;
mod totals;
pub mod view;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Everything a front end shows after a mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard<'a> {
    pub list: ListView<'a>,
    pub totals: Totals,
    pub charts: ChartSet,
}

impl<'a> Dashboard<'a> {
    /// Rebuilds the derived views: list, then totals, then charts.
    pub fn build(expenses: &'a [Expense]) -> Self {
        let list = ListView::build(expenses);
        let totals = Totals::from_expenses(expenses);
        let charts = ChartSet::from_totals(&totals);
        Self {
            list,
            totals,
            charts,
        }
    }
}

#[derive(Debug)]
pub struct Engine<S: Storage> {
    store: ExpenseStore<S>,
}

impl<S: Storage> Engine<S> {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder<S> {
        EngineBuilder { storage: None }
    }

    /// Records in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        self.store.expenses()
    }

    pub fn expense(&self, id: Uuid) -> ResultEngine<&Expense> {
        self.store
            .get(id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// Current dashboard, without mutating anything.
    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::build(self.store.expenses())
    }

    /// Records a new expense. Non-positive amounts are rejected and nothing
    /// is written.
    pub fn add_expense(&mut self, cmd: ExpenseCmd) -> ResultEngine<(Uuid, Dashboard<'_>)> {
        let id = self.store.add(cmd)?;
        Ok((id, self.dashboard()))
    }

    /// Deletes one expense by id.
    pub fn delete_expense(&mut self, id: Uuid) -> ResultEngine<Dashboard<'_>> {
        self.store.remove(id)?;
        Ok(self.dashboard())
    }

    /// Deletes the expense at `position` of the date-descending list.
    pub fn delete_expense_at(&mut self, position: usize) -> ResultEngine<Dashboard<'_>> {
        self.store.remove_at(position)?;
        Ok(self.dashboard())
    }

    /// Deletes every expense and empties the storage slot.
    pub fn delete_all(&mut self) -> ResultEngine<Dashboard<'_>> {
        self.store.clear()?;
        Ok(self.dashboard())
    }

    /// Builds the report for the current records.
    pub fn report(&self, generated_on: NaiveDate) -> Report {
        Report::build(self.store.expenses(), generated_on)
    }

    /// Writes the export file into `dir` and returns its path.
    pub fn export(
        &self,
        format: ExportFormat,
        dir: &Path,
        generated_on: NaiveDate,
    ) -> ResultEngine<PathBuf> {
        match format {
            ExportFormat::Pdf => self.export_pdf(dir, generated_on),
            ExportFormat::Csv => self.export_csv(dir),
        }
    }

    /// Writes `agenda-gastos.pdf` into `dir`.
    pub fn export_pdf(&self, dir: &Path, generated_on: NaiveDate) -> ResultEngine<PathBuf> {
        let bytes = export::pdf_bytes(self.store.expenses(), generated_on);
        export::write_file(dir, ExportFormat::Pdf.file_name(), &bytes)
    }

    /// Writes `agenda-gastos.csv` into `dir`.
    pub fn export_csv(&self, dir: &Path) -> ResultEngine<PathBuf> {
        let bytes = export::csv_bytes(self.store.expenses())?;
        export::write_file(dir, ExportFormat::Csv.file_name(), &bytes)
    }
}

pub struct EngineBuilder<S> {
    storage: Option<S>,
}

impl<S: Storage> EngineBuilder<S> {
    /// Pass the required storage slot
    pub fn storage(mut self, storage: S) -> EngineBuilder<S> {
        self.storage = Some(storage);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine<S>> {
        let storage = self
            .storage
            .ok_or_else(|| EngineError::KeyNotFound("storage".to_string()))?;
        Ok(Engine {
            store: ExpenseStore::open(storage),
        })
    }
}
