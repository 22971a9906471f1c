//! Amount extraction for statement rows.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::TRAILING_AMOUNT;

/// Parse a two-decimal amount such as "-12.34".
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let mut amount = Decimal::from_str(s.trim()).ok()?;
    amount.rescale(2);
    Some(amount)
}

/// Split a row into its label and the raw text of its trailing amount.
///
/// The character immediately before the amount (a currency glyph or
/// separator left behind by text extraction) is not part of the label.
pub fn split_trailing_amount(line: &str) -> Option<(&str, &str)> {
    let found = TRAILING_AMOUNT.find(line)?;

    let mut prefix = line[..found.start()].chars();
    prefix.next_back();

    Some((prefix.as_str(), found.as_str()))
}
