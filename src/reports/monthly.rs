//! Monthly totals
//!
//! Sums each calendar month of the ledger into a fixed twelve-entry series.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::models::{Amount, ExpenseLedger, Month};

/// Total spending of one month
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct MonthlyTotal {
    pub month: Month,
    pub total: f64,
}

/// Spending per month for all twelve months in calendar order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyTotals {
    totals: [f64; 12],
}

impl MonthlyTotals {
    /// All-zero totals
    pub fn zero() -> Self {
        Self::default()
    }

    /// Sum every month of a ledger
    pub fn from_ledger(ledger: &ExpenseLedger) -> Self {
        let mut totals = [0.0; 12];
        for (month, expenses) in ledger.months() {
            totals[month.index()] = expenses.values().copied().sum::<Amount>().value();
        }
        Self { totals }
    }

    /// Build from (month, total) pairs; later pairs for the same month add up
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Month, f64)>,
    {
        let mut totals = [0.0; 12];
        for (month, total) in pairs {
            totals[month.index()] += Amount::new(total).value();
        }
        Self { totals }
    }

    /// Total for a month
    pub fn get(&self, month: Month) -> f64 {
        self.totals[month.index()]
    }

    /// Iterate all twelve months in calendar order
    pub fn iter(&self) -> impl Iterator<Item = MonthlyTotal> + '_ {
        Month::ALL.iter().map(move |month| MonthlyTotal {
            month: *month,
            total: self.totals[month.index()],
        })
    }

    /// Sum over all months
    pub fn total(&self) -> f64 {
        self.totals.iter().sum()
    }
}

impl Serialize for MonthlyTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(12))?;
        for entry in self.iter() {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

/// Spending per month for all twelve months in calendar order
pub fn monthly_totals(ledger: &ExpenseLedger) -> MonthlyTotals {
    MonthlyTotals::from_ledger(ledger)
}

/// Spending of a single month
pub fn month_summary(ledger: &ExpenseLedger, month: Month) -> f64 {
    ledger
        .month(month)
        .map(|expenses| expenses.values().copied().sum::<Amount>().value())
        .unwrap_or(0.0)
}
