//! Batch ingestion of the employee spreadsheet export.
//!
//! The export carries one row per employee: eight fixed demographic columns
//! in free-text form plus one optional column per calendar month holding a
//! KPI value. [`parse`] normalizes individual cells, [`CsvImporter`] drives
//! the whole file into the store as a single transaction.

mod error;
mod import;
pub mod parse;

pub use error::ImportError;
pub use import::{CsvImporter, ImportSummary};
