//! Monthly budget table

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::warn;

use super::{Amount, Month};

/// One budget amount per month; months without an entry have a zero budget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetTable {
    budgets: BTreeMap<Month, Amount>,
}

impl BudgetTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the budget for a month
    pub fn set(&mut self, month: Month, amount: Amount) {
        self.budgets.insert(month, amount);
    }

    /// Budget for a month, zero when unset
    pub fn get(&self, month: Month) -> Amount {
        self.budgets.get(&month).copied().unwrap_or_default()
    }

    /// Budget for a month only if one was set
    pub fn get_set(&self, month: Month) -> Option<Amount> {
        self.budgets.get(&month).copied()
    }

    /// Remove the budget for a month
    pub fn remove(&mut self, month: Month) -> Option<Amount> {
        self.budgets.remove(&month)
    }

    /// Iterate set budgets in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (Month, Amount)> + '_ {
        self.budgets.iter().map(|(m, a)| (*m, *a))
    }

    /// Check if no budget is set
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// Remove all budgets
    pub fn clear(&mut self) {
        self.budgets.clear();
    }
}

impl Serialize for BudgetTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.budgets.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BudgetTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, Amount> = BTreeMap::deserialize(deserializer)?;
        let mut table = BudgetTable::new();
        for (key, amount) in raw {
            match key.parse::<Month>() {
                Ok(month) => table.set(month, amount),
                Err(_) => warn!(month = %key, "Skipping budget for unknown month"),
            }
        }
        Ok(table)
    }
}
