//! The module contains the errors the engine can throw.
//!
//! Validation errors ([`InvalidAmount`], [`InvalidCategory`], [`InvalidDate`])
//! are raised before any state is touched, so the caller can report them and
//! carry on. I/O errors ([`Storage`], [`Export`]) abort only the action that
//! triggered them.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`Storage`]: EngineError::Storage
//!  [`Export`]: EngineError::Export
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Corrupt storage: {0}")]
    CorruptStorage(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Export failed: {0}")]
    Export(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::CorruptStorage(a), Self::CorruptStorage(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.kind() == b.kind(),
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            (Self::Export(a), Self::Export(b)) => a == b,
            _ => false,
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(value: csv::Error) -> Self {
        EngineError::Export(value.to_string())
    }
}
