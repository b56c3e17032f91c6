//! Month-by-month spending per category

use serde::Serialize;

use crate::models::{CategoryIndex, ExpenseLedger, UNCATEGORIZED};

use super::MonthlyTotals;

/// Twelve-month series for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTrend {
    pub category: String,
    pub totals: MonthlyTotals,
}

/// Monthly series for every category with spending, in index order with
/// "Uncategorized" last
pub fn category_trends(ledger: &ExpenseLedger, categories: &CategoryIndex) -> Vec<CategoryTrend> {
    let mut names: Vec<&str> = categories.names().collect();
    if !categories.contains(UNCATEGORIZED) {
        names.push(UNCATEGORIZED);
    }

    names
        .into_iter()
        .map(|category| {
            let totals = MonthlyTotals::from_pairs(
                ledger
                    .iter()
                    .filter(|(_, name, _)| categories.resolve_or_uncategorized(name) == category)
                    .map(|(month, _, amount)| (month, amount.value())),
            );
            CategoryTrend {
                category: category.to_string(),
                totals,
            }
        })
        .filter(|trend| trend.totals.total() > 0.0)
        .collect()
}
