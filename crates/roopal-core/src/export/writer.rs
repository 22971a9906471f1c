//! CSV serialization of exported rows.

use std::io::Write;

use csv::WriterBuilder;
use tracing::debug;

use super::Row;
use crate::error::ExportError;

/// Writes rows as delimited text.
///
/// The header comes from the first row's keys. Later rows are written as
/// they are; rows with a different field set are not realigned.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write a header and all rows to `out`. Nothing is written for no rows.
    pub fn write<W: Write>(&self, rows: &[Row], out: W) -> Result<(), ExportError> {
        let Some(first) = rows.first() else {
            debug!("No rows to write");
            return Ok(());
        };

        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_writer(out);

        wtr.write_record(first.keys())?;
        for row in rows {
            wtr.write_record(row.values())?;
        }

        wtr.flush()?;
        debug!("Wrote {} rows", rows.len());
        Ok(())
    }

    /// Write rows into a string.
    pub fn write_to_string(&self, rows: &[Row]) -> crate::Result<String> {
        let mut buffer = Vec::new();
        self.write(rows, &mut buffer)?;
        Ok(String::from_utf8(buffer).map_err(ExportError::from)?)
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(fields: &[(&'static str, &str)]) -> Row {
        let mut row = Row::new();
        for (k, v) in fields {
            row.push(*k, *v);
        }
        row
    }

    #[test]
    fn test_header_from_first_row() {
        let rows = vec![
            row(&[("invoice", "a"), ("type", "shift")]),
            row(&[("invoice", "b"), ("type", "Tips, cash")]),
        ];
        let csv = CsvWriter::new().write_to_string(&rows).unwrap();
        assert_eq!(csv, "invoice,type\na,shift\nb,\"Tips, cash\"\n");
    }

    #[test]
    fn test_mismatched_rows_are_not_realigned() {
        let rows = vec![
            row(&[("invoice", "a"), ("rider_pii", "Jane"), ("pay", "1.00")]),
            row(&[("invoice", "b"), ("pay", "2.00")]),
        ];
        let csv = CsvWriter::new().write_to_string(&rows).unwrap();
        assert_eq!(csv, "invoice,rider_pii,pay\na,Jane,1.00\nb,2.00\n");
    }

    #[test]
    fn test_delimiter() {
        let rows = vec![row(&[("a", "1"), ("b", "2")])];
        let csv = CsvWriter::new().with_delimiter(b';').write_to_string(&rows).unwrap();
        assert_eq!(csv, "a;b\n1;2\n");
    }

    #[test]
    fn test_no_rows() {
        assert_eq!(CsvWriter::new().write_to_string(&[]).unwrap(), "");
    }
}
