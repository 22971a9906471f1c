//! Locale-pinned English date parsing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a long-form date such as "15 August 2023", "3 Sept 2023" or "1st May 2024".
///
/// Month names are always matched against the English calendar,
/// case-insensitively, in full or three-letter form.
pub fn parse_long_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split_whitespace();
    let day: u32 = strip_ordinal(parts.next()?).parse().ok()?;
    let month = english_month_to_number(parts.next()?)?;
    let year: i32 = parts.next()?.parse().ok()?;

    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a 24-hour "HH:MM" clock time.
pub fn parse_clock_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Combine a date with a clock time.
pub fn at_clock_time(date: NaiveDate, time: &str) -> Option<NaiveDateTime> {
    parse_clock_time(time).map(|t| date.and_time(t))
}

fn strip_ordinal(day: &str) -> &str {
    ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| day.strip_suffix(suffix))
        .unwrap_or(day)
}

fn english_month_to_number(month: &str) -> Option<u32> {
    let month = month.to_ascii_lowercase();
    let number = match month.as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_date() {
        assert_eq!(
            parse_long_date("15 August 2023"),
            NaiveDate::from_ymd_opt(2023, 8, 15)
        );
        assert_eq!(
            parse_long_date("1 jan 2024"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(
            parse_long_date("3 Sept 2023"),
            NaiveDate::from_ymd_opt(2023, 9, 3)
        );
    }

    #[test]
    fn test_parse_long_date_ordinal_day() {
        assert_eq!(
            parse_long_date("14th August 2023"),
            NaiveDate::from_ymd_opt(2023, 8, 14)
        );
        assert_eq!(
            parse_long_date("22nd Feb 2024"),
            NaiveDate::from_ymd_opt(2024, 2, 22)
        );
        assert_eq!(parse_long_date("th August 2023"), None);
    }

    #[test]
    fn test_parse_long_date_rejects_unknown_month() {
        assert_eq!(parse_long_date("15 Sierpnia 2023"), None);
        assert_eq!(parse_long_date("31 February 2023"), None);
        assert_eq!(parse_long_date("15 August"), None);
    }

    #[test]
    fn test_at_clock_time() {
        let date = NaiveDate::from_ymd_opt(2023, 8, 15).unwrap();
        let dt = at_clock_time(date, "18:05").unwrap();
        assert_eq!(dt.to_string(), "2023-08-15 18:05:00");
        assert!(at_clock_time(date, "25:00").is_none());
    }
}
