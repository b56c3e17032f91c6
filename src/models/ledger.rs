//! Expense ledger
//!
//! The ledger maps each month to the expenses recorded in it, keyed by
//! expense name. It is a read cache of what the tracker server stores and is
//! rebuilt per month or in bulk.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::warn;

use super::{Amount, Month};

/// Expenses of a single month, keyed by name
pub type MonthExpenses = BTreeMap<String, Amount>;

/// All recorded expenses keyed by month then expense name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseLedger {
    months: BTreeMap<Month, MonthExpenses>,
}

impl ExpenseLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite an expense
    pub fn insert(&mut self, month: Month, name: impl Into<String>, amount: Amount) {
        self.months
            .entry(month)
            .or_default()
            .insert(name.into(), amount);
    }

    /// Remove an expense, returning its amount if it existed
    pub fn remove(&mut self, month: Month, name: &str) -> Option<Amount> {
        let expenses = self.months.get_mut(&month)?;
        let removed = expenses.remove(name);
        if expenses.is_empty() {
            self.months.remove(&month);
        }
        removed
    }

    /// Get a single expense amount
    pub fn get(&self, month: Month, name: &str) -> Option<Amount> {
        self.months.get(&month).and_then(|e| e.get(name)).copied()
    }

    /// Expenses recorded for a month (None when the month has no entries)
    pub fn month(&self, month: Month) -> Option<&MonthExpenses> {
        self.months.get(&month)
    }

    /// Replace everything recorded for a month
    pub fn replace_month(&mut self, month: Month, expenses: MonthExpenses) {
        if expenses.is_empty() {
            self.months.remove(&month);
        } else {
            self.months.insert(month, expenses);
        }
    }

    /// Iterate months that have entries, in calendar order
    pub fn months(&self) -> impl Iterator<Item = (Month, &MonthExpenses)> {
        self.months.iter().map(|(m, e)| (*m, e))
    }

    /// Iterate every expense as (month, name, amount) in calendar then name order
    pub fn iter(&self) -> impl Iterator<Item = (Month, &str, Amount)> {
        self.months.iter().flat_map(|(month, expenses)| {
            expenses
                .iter()
                .map(move |(name, amount)| (*month, name.as_str(), *amount))
        })
    }

    /// Number of months holding at least one expense, whatever its amount
    pub fn month_count(&self) -> usize {
        self.months.values().filter(|e| !e.is_empty()).count()
    }

    /// Total number of recorded expenses
    pub fn expense_count(&self) -> usize {
        self.months.values().map(BTreeMap::len).sum()
    }

    /// Check if nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.months.values().all(BTreeMap::is_empty)
    }

    /// Remove all expenses
    pub fn clear(&mut self) {
        self.months.clear();
    }
}

impl Serialize for ExpenseLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.months.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExpenseLedger {
    /// Month keys are matched case-insensitively; unknown months are skipped.
    /// Keys that name the same month are merged in key order, so for an
    /// expense listed under both the later key wins.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, Option<BTreeMap<String, Amount>>> =
            BTreeMap::deserialize(deserializer)?;

        let mut ledger = ExpenseLedger::new();
        for (key, expenses) in raw {
            let Ok(month) = key.parse::<Month>() else {
                warn!(month = %key, "Skipping ledger entries for unknown month");
                continue;
            };
            for (name, amount) in expenses.unwrap_or_default() {
                ledger.insert(month, name, amount);
            }
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut ledger = ExpenseLedger::new();
        ledger.insert(Month::January, "Rent", Amount::new(1000.0));
        ledger.insert(Month::January, "Food", Amount::new(200.0));

        assert_eq!(ledger.get(Month::January, "Rent"), Some(Amount::new(1000.0)));
        assert_eq!(ledger.expense_count(), 2);

        assert_eq!(ledger.remove(Month::January, "Rent"), Some(Amount::new(1000.0)));
        assert_eq!(ledger.remove(Month::January, "Rent"), None);
        assert_eq!(ledger.remove(Month::March, "Rent"), None);

        ledger.remove(Month::January, "Food");
        assert!(ledger.is_empty());
        assert!(ledger.month(Month::January).is_none());
    }

    #[test]
    fn test_insert_overwrites() {
        let mut ledger = ExpenseLedger::new();
        ledger.insert(Month::May, "Gym", Amount::new(30.0));
        ledger.insert(Month::May, "Gym", Amount::new(45.0));
        assert_eq!(ledger.expense_count(), 1);
        assert_eq!(ledger.get(Month::May, "Gym"), Some(Amount::new(45.0)));
    }

    #[test]
    fn test_iter_in_calendar_order() {
        let mut ledger = ExpenseLedger::new();
        ledger.insert(Month::December, "Gifts", Amount::new(50.0));
        ledger.insert(Month::February, "Rent", Amount::new(900.0));
        ledger.insert(Month::February, "Coffee", Amount::new(12.0));

        let order: Vec<_> = ledger.iter().map(|(m, n, _)| (m, n.to_string())).collect();
        assert_eq!(
            order,
            vec![
                (Month::February, "Coffee".to_string()),
                (Month::February, "Rent".to_string()),
                (Month::December, "Gifts".to_string()),
            ]
        );
    }

    #[test]
    fn test_deserialize_lenient() {
        let json = r#"{
            "January": {"Rent": 1000, "Food": "200"},
            "january": {"Coffee": "abc"},
            "smarch": {"Ghost": 5},
            "june": null
        }"#;
        let ledger: ExpenseLedger = serde_json::from_str(json).unwrap();

        assert_eq!(ledger.expense_count(), 3);
        assert_eq!(ledger.get(Month::January, "Food"), Some(Amount::new(200.0)));
        assert_eq!(ledger.get(Month::January, "Coffee"), Some(Amount::zero()));
        assert!(ledger.month(Month::June).is_none());
    }

    #[test]
    fn test_deserialize_merges_month_keys_in_key_order() {
        for _ in 0..8 {
            let ledger: ExpenseLedger = serde_json::from_str(
                r#"{"january": {"Rent": 900}, "JANUARY": {"Rent": 1000}, "January": {"Rent": 1100}}"#,
            )
            .unwrap();
            assert_eq!(ledger.get(Month::January, "Rent"), Some(Amount::new(900.0)));
        }
    }

    #[test]
    fn test_month_count_includes_zero_months() {
        let ledger: ExpenseLedger =
            serde_json::from_str(r#"{"march": {"Bad": "abc"}, "may": {"Tea": 3}}"#).unwrap();
        assert_eq!(ledger.month_count(), 2);
        assert_eq!(ExpenseLedger::new().month_count(), 0);
    }

    #[test]
    fn test_serialize_lowercase_keys() {
        let mut ledger = ExpenseLedger::new();
        ledger.insert(Month::March, "Bus", Amount::new(2.5));
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"march":{"Bus":2.5}}"#);
    }
}
