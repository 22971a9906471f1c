//! Common regex patterns for earnings statement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Rider name line; letters include the Latin-1 accented ranges.
    pub static ref RIDER_LINE: Regex = Regex::new(
        r"^Pay to: ([A-Za-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{FF}\s\-]+)$"
    ).unwrap();

    // Pay period line: "Services provided - 14 August 2023 - 20 August 2023";
    // days may carry an ordinal suffix ("14th")
    pub static ref DATE_RANGE_LINE: Regex = Regex::new(
        r"^(?:Services\s+provided|Hours)\s*-\s*(\d{1,2}(?:st|nd|rd|th)?\s+[A-Za-z]+\s+\d{4})\s*-\s*(\d{1,2}(?:st|nd|rd|th)?\s+[A-Za-z]+\s+\d{4})"
    ).unwrap();

    // Section boundaries
    pub static ref SHIFT_HEADER: Regex = Regex::new(
        r"Orders\s+Delivered\s+Total"
    ).unwrap();

    pub static ref SHIFT_FOOTER: Regex = Regex::new(
        r"(?:Fee|Payment)\s+Adjustments"
    ).unwrap();

    pub static ref ADJUSTMENT_HEADER: Regex = Regex::new(
        r"Category\s+Note\s+Amount"
    ).unwrap();

    pub static ref ADJUSTMENT_FOOTER: Regex = Regex::new(
        r"Total\s+Adjustments"
    ).unwrap();

    pub static ref TIPS_LINE: Regex = Regex::new(
        r"\bTips\b"
    ).unwrap();

    // Shift row: "Monday 14 August 2023 18:00 21:30 3.5h 7: £42.10"
    pub static ref SHIFT_ROW: Regex = Regex::new(
        r"(\d{1,2}(?:st|nd|rd|th)?\s+[A-Za-z]+\s+\d{4})\s+(\d{2}:\d{2})\s+(\d{2}:\d{2})\s+\d+\.\d+h\s+(\d+):\s*[^\d\s\-]?(-?\d+\.\d{2})"
    ).unwrap();

    // Trailing two-decimal amount on an adjustment row
    pub static ref TRAILING_AMOUNT: Regex = Regex::new(
        r"-?\d+\.\d{2}$"
    ).unwrap();

    // Version-4 UUID in a file name; '-' or '_' separated
    pub static ref UUID_V4: Regex = Regex::new(
        r"[a-f0-9]{8}[-_][a-f0-9]{4}[-_]4[a-f0-9]{3}[-_][89ab][a-f0-9]{3}[-_][a-f0-9]{12}"
    ).unwrap();
}

/// The line that closes the shift table when no explicit footer exists.
pub const SUMMARY_LINE: &str = "Summary";
