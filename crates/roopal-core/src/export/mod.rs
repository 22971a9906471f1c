//! Flat tabular export of invoice records.

mod writer;

pub use writer::CsvWriter;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::invoice::InvoiceRecord;
use crate::models::line::{InvoiceLine, TimeSource};

/// Shift timestamps: full date-time with offset.
const SHIFT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Pay-period bounds on adjustment rows: no offset.
const PERIOD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One exported row: ordered field names with their values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(&'static str, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.fields.push((key, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Flattens invoice records into rows.
#[derive(Debug, Clone)]
pub struct TabularExporter {
    offset: FixedOffset,
}

impl TabularExporter {
    /// Create an exporter printing shift times in UTC.
    pub fn new() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Set the offset attached to shift timestamps.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// One row per shift, then one per adjustment.
    pub fn rows(&self, record: &InvoiceRecord) -> Vec<Row> {
        record.lines().map(|line| self.row(record, line)).collect()
    }

    /// Rows of every record, in record order.
    pub fn batch_rows(&self, records: &[InvoiceRecord]) -> Vec<Row> {
        records.iter().flat_map(|record| self.rows(record)).collect()
    }

    /// Export records as CSV text.
    pub fn to_csv(&self, records: &[InvoiceRecord], writer: &CsvWriter) -> crate::Result<String> {
        writer.write_to_string(&self.batch_rows(records))
    }

    fn row(&self, record: &InvoiceRecord, line: InvoiceLine<'_>) -> Row {
        let mut row = Row::new();

        row.push("invoice", record.id());
        row.push(
            "rider_anonymised",
            record.rider().map(|r| r.pseudonym()).unwrap_or_default(),
        );
        if !record.is_anonymised() {
            row.push("rider_pii", record.rider().map(|r| r.name()).unwrap_or_default());
        }

        row.push("category", line.category());
        row.push("type", line.line_type());
        row.push("pay", line.pay().to_string());
        row.push("drops", line.drops().to_string());

        let (time_in, time_out) = match line.time_source() {
            TimeSource::Own { time_in, time_out } => {
                (self.format_shift_time(time_in), self.format_shift_time(time_out))
            }
            TimeSource::Period => (
                format_period_bound(record.date_from()),
                format_period_bound(record.date_to()),
            ),
        };
        row.push("in", time_in);
        row.push("out", time_out);

        row
    }

    fn format_shift_time(&self, time: NaiveDateTime) -> String {
        time.and_local_timezone(self.offset)
            .single()
            .map(|t| t.format(SHIFT_TIME_FORMAT).to_string())
            .unwrap_or_default()
    }
}

impl Default for TabularExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_period_bound(date: Option<NaiveDate>) -> String {
    date.map(|d| d.and_time(NaiveTime::MIN).format(PERIOD_TIME_FORMAT).to_string())
        .unwrap_or_default()
}
