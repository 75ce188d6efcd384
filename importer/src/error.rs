use std::path::PathBuf;

use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("input has no header row")]
    EmptyInput,
    #[error("required column '{0}' is missing")]
    MissingColumn(String),
    #[error("could not convert {field} value: {text:?}")]
    ValueConversion { field: &'static str, text: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ImportError {
    pub(crate) fn conversion(field: &'static str, text: &str) -> Self {
        Self::ValueConversion {
            field,
            text: text.to_string(),
        }
    }
}
