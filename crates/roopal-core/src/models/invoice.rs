//! The invoice aggregate assembled from one statement.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::line::{Adjustment, InvoiceLine, Shift};
use super::rider::Rider;

/// One pay-period statement for one rider.
///
/// Built once from a document and read-only afterwards. Rider and pay
/// period are optional because statements without those lines still parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRecord {
    id: String,
    rider: Option<Rider>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    shifts: Vec<Shift>,
    adjustments: Vec<Adjustment>,
    anonymised: bool,
}

impl InvoiceRecord {
    pub fn new(
        id: impl Into<String>,
        rider: Option<Rider>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        shifts: Vec<Shift>,
        adjustments: Vec<Adjustment>,
        anonymised: bool,
    ) -> Self {
        Self {
            id: id.into(),
            rider,
            date_from,
            date_to,
            shifts,
            adjustments,
            anonymised,
        }
    }

    /// Same record with a different anonymisation choice.
    pub fn with_anonymised(mut self, anonymised: bool) -> Self {
        self.anonymised = anonymised;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rider(&self) -> Option<&Rider> {
        self.rider.as_ref()
    }

    /// First day of the pay period (inclusive).
    pub fn date_from(&self) -> Option<NaiveDate> {
        self.date_from
    }

    /// Last day of the pay period (inclusive).
    pub fn date_to(&self) -> Option<NaiveDate> {
        self.date_to
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    /// Whether exports should omit the rider's real name.
    pub fn is_anonymised(&self) -> bool {
        self.anonymised
    }

    /// All lines in export order: shifts first, then adjustments.
    pub fn lines(&self) -> impl Iterator<Item = InvoiceLine<'_>> {
        self.shifts
            .iter()
            .map(InvoiceLine::Shift)
            .chain(self.adjustments.iter().map(InvoiceLine::Adjustment))
    }

    /// Sum of every shift and adjustment amount.
    pub fn total_pay(&self) -> Decimal {
        self.lines().map(|line| line.pay()).sum()
    }
}
