//! Locally held tracker data
//!
//! The ledger, category index and budget table as last loaded from the
//! tracker server (or imported). The fallback path aggregates over this.

use serde::{Deserialize, Serialize};

use super::{BudgetTable, CategoryIndex, ExpenseLedger};

/// Which part of the tracker data a clear operation empties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    Expenses,
    Categories,
    Budgets,
    All,
}

impl ClearScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearScope::Expenses => "expenses",
            ClearScope::Categories => "categories",
            ClearScope::Budgets => "budgets",
            ClearScope::All => "all data",
        }
    }
}

/// Everything the aggregation engine needs, held together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerData {
    #[serde(default)]
    pub expenses: ExpenseLedger,
    #[serde(default)]
    pub categories: CategoryIndex,
    #[serde(default)]
    pub budgets: BudgetTable,
}

impl TrackerData {
    /// Bundle existing parts
    pub fn new(expenses: ExpenseLedger, categories: CategoryIndex, budgets: BudgetTable) -> Self {
        Self {
            expenses,
            categories,
            budgets,
        }
    }

    /// Empty the parts named by `scope`
    pub fn clear(&mut self, scope: ClearScope) {
        match scope {
            ClearScope::Expenses => self.expenses.clear(),
            ClearScope::Categories => self.categories.clear(),
            ClearScope::Budgets => self.budgets.clear(),
            ClearScope::All => {
                self.expenses.clear();
                self.categories.clear();
                self.budgets.clear();
            }
        }
    }

    /// Check if nothing at all is held
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.categories.is_empty() && self.budgets.is_empty()
    }
}
