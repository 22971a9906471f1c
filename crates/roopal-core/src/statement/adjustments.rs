//! Adjustment table extraction with wrapped-label accretion.
//!
//! Text extraction can split one table row over several physical lines when
//! its label wraps. A line without a trailing amount is prefixed (with one
//! space) to the following line, so a run of amount-less lines becomes the
//! label of the first line after it that carries an amount.

use rust_decimal::Decimal;
use tracing::{trace, warn};

use super::rules::{parse_amount, split_trailing_amount};
use crate::models::line::Adjustment;

/// One step of the accretion over adjustment lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A run of lines ending in a trailing amount.
    Resolved { label: String, amount: Decimal },
    /// A run of lines ending in an amount too large to represent.
    Unreadable { label: String, amount: String },
    /// Text still waiting for an amount when the input ran out.
    Dangling(String),
}

/// Folds adjustment lines into label/amount candidates.
///
/// Lazy and finite; clone it to restart from the same position.
#[derive(Debug, Clone)]
pub struct LabelAccretion<'a, S> {
    lines: std::slice::Iter<'a, S>,
    pending: Option<String>,
}

impl<'a, S: AsRef<str>> LabelAccretion<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Self {
            lines: lines.iter(),
            pending: None,
        }
    }
}

impl<S: AsRef<str>> Iterator for LabelAccretion<'_, S> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        loop {
            let Some(line) = self.lines.next() else {
                return self.pending.take().map(Fragment::Dangling);
            };

            let current = match self.pending.take() {
                Some(previous) => format!("{} {}", previous, line.as_ref()),
                None => line.as_ref().to_string(),
            };

            let Some((label, raw)) = split_trailing_amount(&current) else {
                self.pending = Some(current);
                continue;
            };

            let label = label.to_string();
            return Some(match parse_amount(raw) {
                Some(amount) => Fragment::Resolved { label, amount },
                None => Fragment::Unreadable {
                    label,
                    amount: raw.to_string(),
                },
            });
        }
    }
}

/// Parses the adjustment table and the trailing tips line.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentTableParser;

impl AdjustmentTableParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the section lines followed by the tips line, if any.
    pub fn parse<S: AsRef<str>>(&self, lines: &[S], tips_line: Option<&str>) -> Vec<Adjustment> {
        let mut rows: Vec<&str> = lines.iter().map(|line| line.as_ref()).collect();
        rows.extend(tips_line);

        LabelAccretion::new(rows.as_slice())
            .filter_map(|fragment| match fragment {
                Fragment::Resolved { label, amount } => {
                    let adjustment = Adjustment::new(label, amount);
                    if adjustment.is_none() {
                        trace!("Discarding zero-amount adjustment");
                    }
                    adjustment
                }
                Fragment::Unreadable { label, amount } => {
                    warn!("Dropping adjustment {:?} with unreadable amount {}", label, amount);
                    None
                }
                Fragment::Dangling(text) => {
                    trace!("Dropping adjustment text without an amount: {:?}", text);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(adjustments: &[Adjustment]) -> Vec<(&str, String)> {
        adjustments
            .iter()
            .map(|a| (a.label(), a.amount().to_string()))
            .collect()
    }

    #[test]
    fn test_wrapped_label() {
        let adjustments = AdjustmentTableParser::new().parse(&["Referral", "Bonus 15.00"], None);
        assert_eq!(labels(&adjustments), vec![("Referral Bonus", "15.00".to_string())]);
    }

    #[test]
    fn test_long_run_accretes() {
        let adjustments = AdjustmentTableParser::new()
            .parse(&["Missed", "order", "compensation", "for", "14 Aug 4.20"], None);
        assert_eq!(
            labels(&adjustments),
            vec![("Missed order compensation for 14 Aug", "4.20".to_string())]
        );
    }

    #[test]
    fn test_zero_amount_is_discarded() {
        let adjustments = AdjustmentTableParser::new()
            .parse(&["Equipment 0.00", "Late", "fee -12.34"], None);
        assert_eq!(labels(&adjustments), vec![("Late fee", "-12.34".to_string())]);
        assert_eq!(adjustments[0].amount(), Decimal::new(-1234, 2));
    }

    #[test]
    fn test_trailing_fragment_is_dropped() {
        let adjustments = AdjustmentTableParser::new().parse(&["Bonus 5.00", "orphan text"], None);
        assert_eq!(labels(&adjustments), vec![("Bonus", "5.00".to_string())]);
    }

    #[test]
    fn test_tips_line_is_appended() {
        let adjustments = AdjustmentTableParser::new().parse(&["Bonus 5.00"], Some("Tips £12.50"));
        assert_eq!(
            labels(&adjustments),
            vec![("Bonus", "5.00".to_string()), ("Tips ", "12.50".to_string())]
        );
    }

    #[test]
    fn test_unresolved_section_tail_joins_tips() {
        let adjustments = AdjustmentTableParser::new().parse(&["Customer"], Some("Tips 3.00"));
        assert_eq!(labels(&adjustments), vec![("Customer Tips", "3.00".to_string())]);
    }

    #[test]
    fn test_oversized_amount_still_closes_row() {
        let oversized = format!("Bonus {}.00", "9".repeat(32));
        let lines = [oversized.as_str(), "Fee 1.00"];

        let fragments: Vec<Fragment> = LabelAccretion::new(&lines).collect();
        assert_eq!(
            fragments[0],
            Fragment::Unreadable {
                label: "Bonus".to_string(),
                amount: format!("{}.00", "9".repeat(32)),
            }
        );

        let adjustments = AdjustmentTableParser::new().parse(&lines, None);
        assert_eq!(labels(&adjustments), vec![("Fee", "1.00".to_string())]);
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        assert!(AdjustmentTableParser::new().parse(&empty, None).is_empty());
    }

    #[test]
    fn test_accretion_terminal_case_and_restart() {
        let lines = ["Bonus 5.00", "no amount", "here"];
        let accretion = LabelAccretion::new(&lines);

        let fragments: Vec<Fragment> = accretion.clone().collect();
        assert_eq!(
            fragments,
            vec![
                Fragment::Resolved {
                    label: "Bonus".to_string(),
                    amount: Decimal::new(500, 2),
                },
                Fragment::Dangling("no amount here".to_string()),
            ]
        );

        // restarting yields the same sequence
        assert_eq!(accretion.collect::<Vec<_>>(), fragments);
    }
}
