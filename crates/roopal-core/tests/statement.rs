//! End-to-end statement parsing and export.

use std::path::Path;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use roopal_core::statement::rules::UUID_V4;
use roopal_core::{CsvWriter, InvoiceRecord, StatementParser, TabularExporter, TextSource};
use rust_decimal::Decimal;

const STATEMENT: &str = "\
Invoice
Pay to: Zoë Smith-Jones
Services provided - 14 August 2023 - 20 August 2023
Date Start End Worked Orders Delivered Total
Monday 14 August 2023 18:00 21:30 3.5h 7: £42.10
Page 1 of 2
Tuesday 15 August 2023 11:00 14:00 3.0h 5: £30.00
Fee Adjustments
Category Note Amount
Referral
Bonus 15.00
Equipment 0.00
Late fee -12.34
Total Adjustments 2.66
Tips £12.50
Summary
Total 87.26";

const ADJUSTMENTS_ONLY: &str = "\
Pay to: Jane Doe
Services provided - 1 September 2023 - 7 September 2023
Category Note Amount
Weekly guarantee 20.00
Total Adjustments 20.00
Summary";

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn parse(name: &str, text: &str, anonymise: bool) -> InvoiceRecord {
    StatementParser::new().parse_lines(Path::new(name), &lines(text), anonymise)
}

struct InMemorySource(&'static str);

impl TextSource for InMemorySource {
    fn extract_lines(&self, _path: &Path) -> roopal_core::Result<Vec<String>> {
        Ok(lines(self.0))
    }
}

#[test]
fn parses_full_statement() {
    let record = parse("statement.pdf", STATEMENT, false);

    assert_eq!(record.rider().map(|r| r.name()), Some("Zoë Smith-Jones"));
    assert_eq!(record.date_from(), NaiveDate::from_ymd_opt(2023, 8, 14));
    assert_eq!(record.date_to(), NaiveDate::from_ymd_opt(2023, 8, 20));

    assert_eq!(record.shifts().len(), 2);
    assert_eq!(record.shifts()[0].amount(), Decimal::new(4210, 2));
    assert_eq!(record.shifts()[1].drops(), 5);

    let adjustments: Vec<(&str, Decimal)> = record
        .adjustments()
        .iter()
        .map(|a| (a.label(), a.amount()))
        .collect();
    assert_eq!(
        adjustments,
        vec![
            ("Referral Bonus", Decimal::new(1500, 2)),
            ("Late fee", Decimal::new(-1234, 2)),
            ("Tips ", Decimal::new(1250, 2)),
        ]
    );
}

#[test]
fn row_count_is_shifts_plus_adjustments() {
    let record = parse("statement.pdf", STATEMENT, false);
    let rows = TabularExporter::new().rows(&record);
    assert_eq!(rows.len(), record.shifts().len() + record.adjustments().len());
    assert_eq!(rows.len(), 5);
}

#[test]
fn missing_shift_table_still_parses() {
    let record = parse("statement.pdf", ADJUSTMENTS_ONLY, false);
    assert!(record.shifts().is_empty());
    assert_eq!(record.adjustments().len(), 1);
    assert_eq!(record.adjustments()[0].label(), "Weekly guarantee");
}

#[test]
fn identifier_comes_from_file_name() {
    let record = parse(
        "report_3fa85f64-5717-4562-b3fc-2c963f66afa6.pdf",
        STATEMENT,
        false,
    );
    assert_eq!(record.id(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");

    let a = parse("report.pdf", STATEMENT, false);
    let b = parse("report.pdf", STATEMENT, false);
    assert!(UUID_V4.is_match(a.id()));
    assert_ne!(a.id(), b.id());
}

#[test]
fn pseudonyms_are_stable_across_records() {
    let exporter = TabularExporter::new();
    let a = exporter.rows(&parse("a.pdf", STATEMENT, true));
    let b = exporter.rows(&parse("b.pdf", STATEMENT, false));

    assert_eq!(a[0].get("rider_anonymised"), b[0].get("rider_anonymised"));
    assert!(a.iter().all(|row| row.get("rider_pii").is_none()));
    assert!(b.iter().all(|row| row.get("rider_pii") == Some("Zoë Smith-Jones")));
}

#[test]
fn batch_export_keeps_record_then_row_order() {
    let first = parse("a.pdf", STATEMENT, false);
    let second = parse("b.pdf", ADJUSTMENTS_ONLY, false);

    let csv = TabularExporter::new()
        .to_csv(&[first.clone(), second.clone()], &CsvWriter::new())
        .unwrap();
    let out: Vec<&str> = csv.lines().collect();

    assert_eq!(out.len(), 1 + 5 + 1);
    assert_eq!(out[0], "invoice,rider_anonymised,rider_pii,category,type,pay,drops,in,out");
    assert!(out[1].starts_with(first.id()));
    assert!(out[1].contains(",shift,shift,42.10,7,2023-08-14T18:00:00+00:00,"));
    assert!(out[2].contains(",shift,shift,30.00,5,"));
    assert!(out[3].contains(",adjustment,Referral Bonus,15.00,0,2023-08-14 00:00:00,2023-08-20 00:00:00"));
    assert!(out[5].contains(",adjustment,Tips ,12.50,0,"));
    assert!(out[6].starts_with(second.id()));
    assert!(out[6].contains(",adjustment,Weekly guarantee,20.00,0,2023-09-01 00:00:00,2023-09-07 00:00:00"));
}

#[test]
fn parse_file_goes_through_text_source() {
    let record = StatementParser::new()
        .parse_file(Path::new("week-33.PDF"), &InMemorySource(STATEMENT), false)
        .unwrap();
    assert_eq!(record.shifts().len(), 2);

    let rejected = StatementParser::new().parse_file(
        Path::new("week-33.csv"),
        &InMemorySource(STATEMENT),
        false,
    );
    assert!(rejected.is_err());
}
