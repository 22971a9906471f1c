//! Earnings statement extraction module.

mod adjustments;
pub mod rules;
mod scanner;
mod shifts;

pub use adjustments::{AdjustmentTableParser, Fragment, LabelAccretion};
pub use scanner::{DocumentScanner, ScanOutcome, ScanState};
pub use shifts::ShiftTableParser;

use std::path::Path;

use tracing::info;

use crate::error::StatementError;
use crate::models::invoice::InvoiceRecord;
use crate::models::rider::Rider;
use crate::pdf::TextSource;
use rules::resolve_identifier;

/// Turns statement documents into invoice records.
#[derive(Debug, Clone, Default)]
pub struct StatementParser {
    shifts: ShiftTableParser,
    adjustments: AdjustmentTableParser,
}

impl StatementParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set overnight shift handling.
    pub fn with_overnight_rollover(mut self, roll_overnight: bool) -> Self {
        self.shifts = self.shifts.with_overnight_rollover(roll_overnight);
        self
    }

    /// Read and parse the PDF statement at `path`.
    ///
    /// Anything but a `.pdf` file is rejected before the source is touched.
    pub fn parse_file<T: TextSource>(
        &self,
        path: &Path,
        source: &T,
        anonymise: bool,
    ) -> crate::Result<InvoiceRecord> {
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(StatementError::InvalidInput(format!(
                "file provided is not a PDF: {}",
                path.display()
            ))
            .into());
        }

        let lines = source.extract_lines(path)?;
        Ok(self.parse_lines(path, &lines, anonymise))
    }

    /// Parse already extracted statement lines.
    ///
    /// `path` is only used to derive the invoice identifier.
    pub fn parse_lines(&self, path: &Path, lines: &[String], anonymise: bool) -> InvoiceRecord {
        info!("Parsing statement from {} lines", lines.len());

        let outcome = DocumentScanner::new(lines).scan();
        let shifts = self.shifts.parse(outcome.shift_lines);
        let adjustments = self.adjustments.parse(outcome.adjustment_lines, outcome.tips_line);

        let record = InvoiceRecord::new(
            resolve_identifier(path),
            outcome.rider.map(Rider::new),
            outcome.date_from,
            outcome.date_to,
            shifts,
            adjustments,
            anonymise,
        );

        info!(
            "Parsed invoice {} with {} shifts and {} adjustments",
            record.id(),
            record.shifts().len(),
            record.adjustments().len()
        );

        record
    }
}
