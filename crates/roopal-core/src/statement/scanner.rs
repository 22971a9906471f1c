//! Single-pass section scanner for statement text.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::rules::{
    parse_long_date, ADJUSTMENT_FOOTER, ADJUSTMENT_HEADER, DATE_RANGE_LINE, RIDER_LINE,
    SHIFT_FOOTER, SHIFT_HEADER, SUMMARY_LINE, TIPS_LINE,
};

/// Where the scanner is in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Outside any table.
    Preamble,
    /// Between the shift table header and its footer.
    InShiftTable,
    /// Between the adjustment table header and its footer.
    InAdjustmentTable,
    /// The adjustment table has been closed.
    Done,
}

/// A recognised section boundary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    ShiftHeader,
    ShiftFooter,
    AdjustmentHeader,
    AdjustmentFooter,
    Summary,
}

impl ScanState {
    fn on(self, marker: Marker) -> ScanState {
        match (self, marker) {
            (_, Marker::ShiftHeader) => ScanState::InShiftTable,
            (ScanState::InShiftTable, Marker::ShiftFooter | Marker::Summary) => ScanState::Preamble,
            (_, Marker::AdjustmentHeader) => ScanState::InAdjustmentTable,
            (ScanState::InAdjustmentTable, Marker::AdjustmentFooter) => ScanState::Done,
            (state, _) => state,
        }
    }
}

/// Line indices of the recognised markers.
///
/// Every marker except `summary` keeps its last occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cursors {
    shift_header: Option<usize>,
    shift_footer: Option<usize>,
    adjustment_header: Option<usize>,
    adjustment_footer: Option<usize>,
    tips: Option<usize>,
    summary: Option<usize>,
}

/// What one pass over a document found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome<'a> {
    /// State after the last line.
    pub state: ScanState,
    pub rider: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Lines between the shift table header and footer.
    pub shift_lines: &'a [String],
    /// Lines between the adjustment table header and footer.
    pub adjustment_lines: &'a [String],
    /// The last line mentioning tips.
    pub tips_line: Option<&'a str>,
}

/// Locates section boundaries and top-level metadata in one forward pass.
pub struct DocumentScanner<'a> {
    lines: &'a [String],
    state: ScanState,
    cursors: Cursors,
    rider: Option<String>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
}

impl<'a> DocumentScanner<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self {
            lines,
            state: ScanState::Preamble,
            cursors: Cursors::default(),
            rider: None,
            date_from: None,
            date_to: None,
        }
    }

    /// Scan every line and resolve the section slices.
    pub fn scan(mut self) -> ScanOutcome<'a> {
        let lines = self.lines;
        for (i, line) in lines.iter().enumerate() {
            self.feed(i, line);
        }
        self.finish()
    }

    fn feed(&mut self, i: usize, line: &str) {
        if let Some(caps) = RIDER_LINE.captures(line) {
            self.rider = Some(caps[1].to_string());
        }

        if let Some(caps) = DATE_RANGE_LINE.captures(line) {
            match (parse_long_date(&caps[1]), parse_long_date(&caps[2])) {
                (Some(from), Some(to)) => {
                    if from > to {
                        warn!("Pay period ends before it starts: {} - {}", from, to);
                    }
                    self.date_from = Some(from);
                    self.date_to = Some(to);
                }
                _ => debug!("line {}: unreadable pay period {:?}", i, line),
            }
        }

        // Conditions are independent; one line may carry several markers.
        if SHIFT_HEADER.is_match(line) {
            self.cursors.shift_header = Some(i);
            self.transition(i, Marker::ShiftHeader);
        }
        if SHIFT_FOOTER.is_match(line) {
            self.cursors.shift_footer = Some(i);
            self.transition(i, Marker::ShiftFooter);
        }
        if ADJUSTMENT_HEADER.is_match(line) {
            self.cursors.adjustment_header = Some(i);
            self.transition(i, Marker::AdjustmentHeader);
        }
        if ADJUSTMENT_FOOTER.is_match(line) {
            self.cursors.adjustment_footer = Some(i);
            self.transition(i, Marker::AdjustmentFooter);
        }
        if TIPS_LINE.is_match(line) {
            self.cursors.tips = Some(i);
        }
        if line == SUMMARY_LINE && self.cursors.summary.is_none() {
            self.cursors.summary = Some(i);
            self.transition(i, Marker::Summary);
        }
    }

    fn transition(&mut self, i: usize, marker: Marker) {
        let next = self.state.on(marker);
        if next != self.state {
            debug!("line {}: {:?} -> {:?} on {:?}", i, self.state, next, marker);
        }
        self.state = next;
    }

    fn finish(self) -> ScanOutcome<'a> {
        let lines = self.lines;
        let c = self.cursors;

        let shift_start = c.shift_header.map(|i| i + 1);
        let shift_end = c
            .shift_footer
            .or(c.summary)
            .and_then(|i| i.checked_sub(1));

        let adjustment_start = c.adjustment_header.map(|i| i + 1);
        let adjustment_end = c.adjustment_footer.and_then(|i| i.checked_sub(1));

        let shift_lines = bounded(lines, shift_start, shift_end);
        let adjustment_lines = bounded(lines, adjustment_start, adjustment_end);

        debug!(
            "Resolved sections: shifts {:?}..={:?} ({} lines), adjustments {:?}..={:?} ({} lines), final state {:?}",
            shift_start,
            shift_end,
            shift_lines.len(),
            adjustment_start,
            adjustment_end,
            adjustment_lines.len(),
            self.state
        );

        ScanOutcome {
            state: self.state,
            rider: self.rider,
            date_from: self.date_from,
            date_to: self.date_to,
            shift_lines,
            adjustment_lines,
            tips_line: c.tips.map(|i| lines[i].as_str()),
        }
    }
}

/// Inclusive slice between two cursors; empty unless both are set and ordered.
fn bounded(lines: &[String], start: Option<usize>, end: Option<usize>) -> &[String] {
    match (start, end) {
        (Some(start), Some(end)) if start <= end && end < lines.len() => &lines[start..=end],
        _ => &[],
    }
}
