//! Core library for courier earnings statements.
//!
//! This crate provides:
//! - PDF text extraction behind a [`TextSource`] seam
//! - Section scanning of the extracted statement text
//! - Shift and fee/tip adjustment extraction, including wrapped labels
//! - Invoice data models and a flat tabular (CSV) export

pub mod error;
pub mod export;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{RoopalError, Result};
pub use export::{CsvWriter, Row, TabularExporter};
pub use models::config::RoopalConfig;
pub use models::invoice::InvoiceRecord;
pub use models::line::{Adjustment, InvoiceLine, Shift, TimeSource};
pub use models::rider::Rider;
pub use pdf::{PdfExtractor, PdfProcessor, TextSource};
pub use statement::{DocumentScanner, ScanOutcome, ScanState, StatementParser};
