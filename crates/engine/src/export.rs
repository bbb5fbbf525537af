//! File exports: the PDF report and a CSV dump of the records.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;

use crate::{
    EngineError, Expense, ResultEngine,
    report::{Report, layout::layout, pdf},
};

pub const PDF_FILE_NAME: &str = "agenda-gastos.pdf";
pub const CSV_FILE_NAME: &str = "agenda-gastos.csv";

/// Export formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Csv,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Pdf => PDF_FILE_NAME,
            ExportFormat::Csv => CSV_FILE_NAME,
        }
    }
}

impl TryFrom<&str> for ExportFormat {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(EngineError::Export(format!("unsupported format: {other}"))),
        }
    }
}

/// Builds the PDF report bytes for `expenses`.
pub fn pdf_bytes(expenses: &[Expense], generated_on: NaiveDate) -> Vec<u8> {
    pdf::render(&layout(&Report::build(expenses, generated_on)))
}

/// Builds the CSV dump of `expenses`, in insertion order.
pub fn csv_bytes(expenses: &[Expense]) -> ResultEngine<Vec<u8>> {
    #[derive(Serialize)]
    struct ExportRow<'a> {
        id: String,
        date: String,
        category: &'a str,
        amount: String,
        note: &'a str,
    }

    let mut writer = Writer::from_writer(vec![]);
    for expense in expenses {
        writer.serialize(ExportRow {
            id: expense.id.to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            category: expense.category.label(),
            amount: expense.amount.format_plain(),
            note: &expense.note,
        })?;
    }
    writer
        .into_inner()
        .map_err(|err| EngineError::Export(err.to_string()))
}

/// Writes `bytes` to `dir/file_name`, creating `dir` when needed.
pub(crate) fn write_file(dir: &Path, file_name: &str, bytes: &[u8]) -> ResultEngine<PathBuf> {
    fs::create_dir_all(dir).map_err(|err| EngineError::Export(err.to_string()))?;
    let path = dir.join(file_name);
    fs::write(&path, bytes).map_err(|err| EngineError::Export(err.to_string()))?;
    tracing::info!("exported {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, MoneyCents};

    #[test]
    fn csv_has_header_and_one_line_per_record() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let expense = Expense::new(date, Category::Cafeteria, MoneyCents::new(250), "café, solo");
        let bytes = csv_bytes(std::slice::from_ref(&expense)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,date,category,amount,note"));
        assert_eq!(
            lines.next(),
            Some(format!("{},2024-01-06,Cafetería,2.50,\"café, solo\"", expense.id).as_str())
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn format_parsing() {
        assert_eq!(ExportFormat::try_from("PDF").unwrap(), ExportFormat::Pdf);
        assert_eq!(ExportFormat::try_from("csv").unwrap().file_name(), CSV_FILE_NAME);
        assert!(ExportFormat::try_from("xlsx").is_err());
    }
}
