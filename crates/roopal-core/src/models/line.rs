//! Invoice line items: worked shifts and adjustments.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One worked session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    time_in: NaiveDateTime,
    time_out: NaiveDateTime,
    amount: Decimal,
    drops: u32,
}

impl Shift {
    /// Category and type of every shift line.
    pub const CATEGORY: &'static str = "shift";

    /// Create a shift. Returns `None` when it would end before it starts.
    pub fn new(
        time_in: NaiveDateTime,
        time_out: NaiveDateTime,
        amount: Decimal,
        drops: u32,
    ) -> Option<Self> {
        if time_out < time_in {
            return None;
        }
        Some(Self {
            time_in,
            time_out,
            amount,
            drops,
        })
    }

    pub fn time_in(&self) -> NaiveDateTime {
        self.time_in
    }

    pub fn time_out(&self) -> NaiveDateTime {
        self.time_out
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Number of deliveries made.
    pub fn drops(&self) -> u32 {
        self.drops
    }

    /// Time worked.
    pub fn duration(&self) -> Duration {
        self.time_out - self.time_in
    }
}

/// A non-shift line item: fee, credit or tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    label: String,
    amount: Decimal,
}

impl Adjustment {
    /// Category of every adjustment line.
    pub const CATEGORY: &'static str = "adjustment";

    /// Create an adjustment. Zero amounts are not adjustments and yield `None`.
    pub fn new(label: impl Into<String>, amount: Decimal) -> Option<Self> {
        if amount.is_zero() {
            return None;
        }
        Some(Self {
            label: label.into(),
            amount,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Where an exported line takes its in/out timestamps from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// The line carries its own timestamps.
    Own {
        time_in: NaiveDateTime,
        time_out: NaiveDateTime,
    },
    /// The line borrows the invoice's pay period.
    Period,
}

/// A borrowed view over either kind of line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceLine<'a> {
    Shift(&'a Shift),
    Adjustment(&'a Adjustment),
}

impl<'a> InvoiceLine<'a> {
    pub fn category(&self) -> &'static str {
        match self {
            InvoiceLine::Shift(_) => Shift::CATEGORY,
            InvoiceLine::Adjustment(_) => Adjustment::CATEGORY,
        }
    }

    /// Shift lines are typed "shift"; adjustments by their label.
    pub fn line_type(&self) -> &'a str {
        match *self {
            InvoiceLine::Shift(_) => Shift::CATEGORY,
            InvoiceLine::Adjustment(adjustment) => adjustment.label(),
        }
    }

    pub fn pay(&self) -> Decimal {
        match self {
            InvoiceLine::Shift(shift) => shift.amount(),
            InvoiceLine::Adjustment(adjustment) => adjustment.amount(),
        }
    }

    /// Adjustments always report zero drops.
    pub fn drops(&self) -> u32 {
        match self {
            InvoiceLine::Shift(shift) => shift.drops(),
            InvoiceLine::Adjustment(_) => 0,
        }
    }

    pub fn time_source(&self) -> TimeSource {
        match self {
            InvoiceLine::Shift(shift) => TimeSource::Own {
                time_in: shift.time_in(),
                time_out: shift.time_out(),
            },
            InvoiceLine::Adjustment(_) => TimeSource::Period,
        }
    }
}
