//! Spending by category
//!
//! Every expense in every month is attributed to the category that claims
//! its name, or to "Uncategorized". Categories that end up at exactly zero
//! are left out of the breakdown.

use serde::Serialize;

use crate::models::{Amount, CategoryIndex, ExpenseLedger, MonthExpenses, UNCATEGORIZED};

/// Total spending of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Non-zero category totals in category-index order, "Uncategorized" last
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    /// Build from (category, total) pairs, dropping zero totals
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category: category.into(),
                total: Amount::new(total).value(),
            })
            .filter(|entry| entry.total != 0.0)
            .collect();
        Self { entries }
    }

    /// Total for a category (zero when absent)
    pub fn get(&self, category: &str) -> f64 {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map_or(0.0, |e| e.total)
    }

    /// Iterate entries in order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    /// Sum over all categories
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.total).sum()
    }

    /// Number of categories with spending
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no category has spending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by total, largest first
    pub fn ranked(&self) -> Vec<&CategoryTotal> {
        let mut ranked: Vec<_> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.total.total_cmp(&a.total));
        ranked
    }
}

/// Sum spending per category over the whole ledger
pub fn category_totals(ledger: &ExpenseLedger, categories: &CategoryIndex) -> CategoryTotals {
    let mut sums: Vec<(String, f64)> = categories.names().map(|n| (n.to_string(), 0.0)).collect();
    let mut uncategorized = 0.0;

    for (_, name, amount) in ledger.iter() {
        match categories.resolve(name) {
            Some(category) => {
                if let Some(slot) = sums.iter_mut().find(|(c, _)| c == category) {
                    slot.1 += amount.value();
                }
            }
            None => uncategorized += amount.value(),
        }
    }

    sums.push((UNCATEGORIZED.to_string(), uncategorized));
    merge_uncategorized(CategoryTotals::from_pairs(sums))
}

/// An index may itself define a category named "Uncategorized"; fold the
/// synthetic bucket into it so the name appears once.
fn merge_uncategorized(totals: CategoryTotals) -> CategoryTotals {
    let mut entries: Vec<CategoryTotal> = Vec::with_capacity(totals.entries.len());
    for entry in totals.entries {
        match entries.iter_mut().find(|e| e.category == entry.category) {
            Some(existing) => existing.total += entry.total,
            None => entries.push(entry),
        }
    }
    CategoryTotals { entries }
}

/// The expenses that belong to one category, keyed by month
///
/// Returns None when the category does not exist in the index.
pub fn category_expenses(
    ledger: &ExpenseLedger,
    categories: &CategoryIndex,
    category: &str,
) -> Option<ExpenseLedger> {
    if !categories.contains(category) {
        return None;
    }

    let mut result = ExpenseLedger::new();
    for (month, expenses) in ledger.months() {
        let matching: MonthExpenses = expenses
            .iter()
            .filter(|(name, _)| categories.resolve(name) == Some(category))
            .map(|(name, amount)| (name.clone(), *amount))
            .collect();
        result.replace_month(month, matching);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;
    use crate::reports::monthly_totals;

    fn scenario() -> (ExpenseLedger, CategoryIndex) {
        let mut ledger = ExpenseLedger::new();
        ledger.insert(Month::January, "Rent", Amount::new(1000.0));
        ledger.insert(Month::January, "Food", Amount::new(200.0));
        ledger.insert(Month::February, "Rent", Amount::new(1000.0));

        let mut categories = CategoryIndex::new();
        categories.add_category("Housing").unwrap();
        categories.assign("Housing", "Rent").unwrap();
        (ledger, categories)
    }

    #[test]
    fn test_scenario_totals() {
        let (ledger, categories) = scenario();
        let totals = category_totals(&ledger, &categories);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("Housing"), 2000.0);
        assert_eq!(totals.get(UNCATEGORIZED), 200.0);
        let order: Vec<_> = totals.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(order, vec!["Housing", UNCATEGORIZED]);
    }

    #[test]
    fn test_zero_categories_dropped() {
        let (ledger, mut categories) = scenario();
        categories.add_category("Travel").unwrap();
        categories.assign("Travel", "Flights").unwrap();

        let totals = category_totals(&ledger, &categories);
        assert_eq!(totals.get("Travel"), 0.0);
        assert!(totals.iter().all(|e| e.category != "Travel"));
        // The index itself is untouched
        assert!(categories.contains("Travel"));
    }

    #[test]
    fn test_uncategorized_dropped_when_zero() {
        let mut ledger = ExpenseLedger::new();
        ledger.insert(Month::March, "Rent", Amount::new(900.0));
        let mut categories = CategoryIndex::new();
        categories.add_category("Housing").unwrap();
        categories.assign("Housing", "Rent").unwrap();

        let totals = category_totals(&ledger, &categories);
        assert_eq!(totals.len(), 1);
        assert!(totals.iter().all(|e| e.category != UNCATEGORIZED));
    }

    #[test]
    fn test_partitions_monthly_totals() {
        let (ledger, categories) = scenario();
        let by_category = category_totals(&ledger, &categories);
        let by_month = monthly_totals(&ledger);
        assert_eq!(by_category.total(), by_month.total());
    }

    #[test]
    fn test_overlapping_names_counted_once() {
        let mut ledger = ExpenseLedger::new();
        ledger.insert(Month::May, "Coffee", Amount::new(4.0));
        let mut categories = CategoryIndex::new();
        categories.insert_raw("Treats", vec!["Coffee".into()]);
        categories.insert_raw("Food", vec!["Coffee".into()]);

        let totals = category_totals(&ledger, &categories);
        assert_eq!(totals.get("Food"), 4.0);
        assert_eq!(totals.get("Treats"), 0.0);
        assert_eq!(totals.total(), 4.0);
    }

    #[test]
    fn test_explicit_uncategorized_category_merges() {
        let mut ledger = ExpenseLedger::new();
        ledger.insert(Month::May, "Misc", Amount::new(4.0));
        ledger.insert(Month::May, "Other", Amount::new(6.0));
        let mut categories = CategoryIndex::new();
        categories.insert_raw(UNCATEGORIZED, vec!["Misc".into()]);

        let totals = category_totals(&ledger, &categories);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get(UNCATEGORIZED), 10.0);
    }

    #[test]
    fn test_category_expenses() {
        let (ledger, categories) = scenario();
        let housing = category_expenses(&ledger, &categories, "Housing").unwrap();
        assert_eq!(housing.expense_count(), 2);
        assert!(housing.get(Month::January, "Food").is_none());
        assert!(category_expenses(&ledger, &categories, "Missing").is_none());
    }

    #[test]
    fn test_ranked() {
        let totals = CategoryTotals::from_pairs([("A", 5.0), ("B", 50.0), ("C", 0.0)]);
        let ranked: Vec<_> = totals.ranked().iter().map(|e| e.category.clone()).collect();
        assert_eq!(ranked, vec!["B".to_string(), "A".to_string()]);
    }
}
