//! The module contains the `Expense` type, the only record the engine keeps.
//!
//! Field names on disk are the historical ones (`fecha`, `categoria`,
//! `monto`, `descripcion`), so data written by older versions keeps loading.
use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, EngineError, MoneyCents, ResultEngine};

/// One logged expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Immutable identity, assigned at creation. Older data has no id: a new
    /// one is generated while loading.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "categoria")]
    pub category: Category,
    #[serde(rename = "monto", with = "amount_major")]
    pub amount: MoneyCents,
    #[serde(rename = "descripcion", default)]
    pub note: String,
}

impl Expense {
    pub fn new(date: NaiveDate, category: Category, amount: MoneyCents, note: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            category,
            amount,
            note: note.trim().to_string(),
        }
    }

    /// Returns the note, or `None` when it is empty.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        if self.note.is_empty() {
            None
        } else {
            Some(self.note.as_str())
        }
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if !self.amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be > 0, got {}",
                self.amount.format_plain()
            )));
        }
        if self.amount > MoneyCents::MAX {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be <= {}, got {}",
                MoneyCents::MAX.format_plain(),
                self.amount.format_plain()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.date, self.category, self.amount)?;
        if let Some(note) = self.note() {
            write!(f, " ({note})")?;
        }
        Ok(())
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(raw.trim().to_string()))
}

mod amount_major {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::MoneyCents;

    pub fn serialize<S: Serializer>(amount: &MoneyCents, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(amount.to_major())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MoneyCents, D::Error> {
        let value = f64::deserialize(deserializer)?;
        MoneyCents::from_major(value).ok_or_else(|| D::Error::custom("amount out of range"))
    }
}
