//! Shift table row extraction.

use chrono::Duration;
use tracing::trace;

use super::rules::{at_clock_time, parse_amount, parse_long_date, SHIFT_ROW};
use crate::models::line::Shift;

/// Parses rows of the shift table.
#[derive(Debug, Clone)]
pub struct ShiftTableParser {
    roll_overnight: bool,
}

impl ShiftTableParser {
    pub fn new() -> Self {
        Self {
            roll_overnight: true,
        }
    }

    /// Whether a shift ending at an earlier clock time than it started ends
    /// on the following day. When disabled such rows are skipped.
    pub fn with_overnight_rollover(mut self, roll_overnight: bool) -> Self {
        self.roll_overnight = roll_overnight;
        self
    }

    /// Parse every recognisable row, in order. Other rows are skipped.
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Shift> {
        lines
            .iter()
            .filter_map(|line| {
                let line = line.as_ref();
                let shift = self.parse_row(line);
                if shift.is_none() {
                    trace!("Skipping shift table line: {:?}", line);
                }
                shift
            })
            .collect()
    }

    /// Parse a single shift row.
    pub fn parse_row(&self, line: &str) -> Option<Shift> {
        let caps = SHIFT_ROW.captures(line)?;

        let date = parse_long_date(&caps[1])?;
        let time_in = at_clock_time(date, &caps[2])?;
        let mut time_out = at_clock_time(date, &caps[3])?;
        let drops: u32 = caps[4].parse().ok()?;
        let amount = parse_amount(&caps[5])?;

        if time_out < time_in {
            if !self.roll_overnight {
                return None;
            }
            time_out += Duration::days(1);
        }

        Shift::new(time_in, time_out, amount, drops)
    }
}

impl Default for ShiftTableParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    #[test]
    fn test_parse_row() {
        let shift = ShiftTableParser::new()
            .parse_row("Monday 14 August 2023 18:00 21:30 3.5h 7: £42.10")
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2023, 8, 14).unwrap();
        assert_eq!(shift.time_in(), day.and_hms_opt(18, 0, 0).unwrap());
        assert_eq!(shift.time_out(), day.and_hms_opt(21, 30, 0).unwrap());
        assert_eq!(shift.amount(), Decimal::new(4210, 2));
        assert_eq!(shift.drops(), 7);
    }

    #[test]
    fn test_parse_row_without_weekday_or_symbol() {
        let shift = ShiftTableParser::new()
            .parse_row("3 September 2023 09:15 10:00 0.8h 2: 9.50")
            .unwrap();
        assert_eq!(shift.amount(), Decimal::new(950, 2));
        assert_eq!(shift.drops(), 2);
    }

    #[test]
    fn test_parse_row_with_ordinal_day() {
        let shift = ShiftTableParser::new()
            .parse_row("Friday 1st September 2023 12:00 13:00 1.0h 3: £11.00")
            .unwrap();
        let day = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();
        assert_eq!(shift.time_in(), day.and_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_decorative_lines_are_skipped() {
        let lines = [
            "",
            "Monday 14 August 2023 18:00 21:30 3.5h 7: £42.10",
            "Page 1 of 2",
            "Tuesday 15 August 2023 11:00 14:00 3.0h 5: £30.00",
            "Total 72.10",
        ];
        let shifts = ShiftTableParser::new().parse(&lines);

        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].drops(), 7);
        assert_eq!(shifts[1].drops(), 5);
    }

    #[test]
    fn test_unknown_month_is_skipped() {
        let parser = ShiftTableParser::new();
        assert!(parser.parse_row("14 Agosto 2023 18:00 21:30 3.5h 7: £42.10").is_none());
    }

    #[test]
    fn test_overnight_shift() {
        let line = "Friday 18 August 2023 22:00 01:00 3.0h 4: £28.00";

        let shift = ShiftTableParser::new().parse_row(line).unwrap();
        assert_eq!(shift.duration(), Duration::hours(3));
        assert_eq!(
            shift.time_out().date(),
            NaiveDate::from_ymd_opt(2023, 8, 19).unwrap()
        );

        let strict = ShiftTableParser::new().with_overnight_rollover(false);
        assert!(strict.parse_row(line).is_none());
    }
}
