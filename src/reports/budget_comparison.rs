//! Budget versus actual spending
//!
//! Produces three parallel series for charting, one entry per month that has
//! either spending or a budget.

use serde::Serialize;

use crate::models::{BudgetTable, ExpenseLedger, Month};

use super::MonthlyTotals;

/// Parallel series of month labels, budgets and actual spending
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub months: Vec<String>,
    pub budgets: Vec<f64>,
    pub actual: Vec<f64>,
}

impl BudgetComparison {
    /// Number of months in the series
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Check if no month has spending or a budget
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Iterate (label, budget, actual) rows
    pub fn rows(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.months
            .iter()
            .zip(&self.budgets)
            .zip(&self.actual)
            .map(|((month, budget), actual)| (month.as_str(), *budget, *actual))
    }
}

/// Compare monthly spending with the budget table
pub fn budget_comparison(totals: &MonthlyTotals, budgets: &BudgetTable) -> BudgetComparison {
    let mut comparison = BudgetComparison::default();

    for month in Month::ALL {
        let spent = totals.get(month);
        let budget = budgets.get(month).value();
        if spent > 0.0 || budget > 0.0 {
            comparison.months.push(month.display_name().to_string());
            comparison.budgets.push(budget);
            comparison.actual.push(spent);
        }
    }

    comparison
}

/// Spending, budget and what is left of it for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub month: Month,
    pub total_spent: f64,
    pub budget: f64,
    /// Negative when the month is over budget
    pub remaining: f64,
}

impl BudgetStatus {
    /// Check if spending exceeds the budget
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

/// Budget status of a single month
pub fn budget_status(ledger: &ExpenseLedger, budgets: &BudgetTable, month: Month) -> BudgetStatus {
    let total_spent = super::month_summary(ledger, month);
    let budget = budgets.get(month).value();
    BudgetStatus {
        month,
        total_spent,
        budget,
        remaining: budget - total_spent,
    }
}
