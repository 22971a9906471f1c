//! Error types for the roopal-core library.

use thiserror::Error;

/// Main error type for the roopal library.
#[derive(Error, Debug)]
pub enum RoopalError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Statement input was rejected.
    #[error("statement error: {0}")]
    Statement(#[from] StatementError),

    /// Tabular export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised before a statement is parsed.
#[derive(Error, Debug)]
pub enum StatementError {
    /// The input is not something the parser accepts.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to tabular export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The written output was not valid UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for the roopal library.
pub type Result<T> = std::result::Result<T, RoopalError>;
