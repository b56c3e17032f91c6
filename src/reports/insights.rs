//! Spending insights
//!
//! Headline numbers: total and average spending, the peak month and the top
//! category. Values stay unrounded in [`Insights`]; [`InsightsView`] is the
//! two-decimal presentation form.

use serde::{Deserialize, Serialize};

use crate::models::Month;

use super::{CategoryTotals, MonthlyTotals};

/// The month with the highest spending
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PeakMonth {
    /// None when no month has spending
    pub month: Option<Month>,
    pub amount: f64,
}

/// The category with the highest spending
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TopCategory {
    /// Empty when no category has spending
    pub category: String,
    pub amount: f64,
}

/// Summary figures over a set of totals
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Insights {
    pub total_spending: f64,
    pub avg_monthly_spending: f64,
    pub highest_spending_month: PeakMonth,
    pub top_spending_category: TopCategory,
}

impl Insights {
    /// Presentation form with amounts fixed to two decimals
    pub fn view(&self) -> InsightsView {
        InsightsView {
            total_spending: fixed(self.total_spending),
            avg_monthly_spending: fixed(self.avg_monthly_spending),
            highest_spending_month: MonthAmountView {
                month: self
                    .highest_spending_month
                    .month
                    .map(|m| m.display_name().to_string())
                    .unwrap_or_default(),
                amount: fixed(self.highest_spending_month.amount),
            },
            top_spending_category: CategoryAmountView {
                category: self.top_spending_category.category.clone(),
                amount: fixed(self.top_spending_category.amount),
            },
        }
    }
}

fn fixed(value: f64) -> String {
    format!("{:.2}", value)
}

/// Month and amount as display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAmountView {
    pub month: String,
    pub amount: String,
}

/// Category and amount as display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAmountView {
    pub category: String,
    pub amount: String,
}

/// Insights formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsView {
    pub total_spending: String,
    pub avg_monthly_spending: String,
    pub highest_spending_month: MonthAmountView,
    pub top_spending_category: CategoryAmountView,
}

/// Compute insights from monthly and category totals
///
/// The average divides by `recorded_months`, the number of months holding any
/// expense record (at least one), so a month of zero or malformed amounts
/// still counts. Peaks require a strictly greater total, so ties go to the
/// earlier month or the earlier category.
pub fn insights(
    monthly: &MonthlyTotals,
    categories: &CategoryTotals,
    recorded_months: usize,
) -> Insights {
    let total_spending = monthly.total();
    let avg_monthly_spending = total_spending / recorded_months.max(1) as f64;

    let highest_spending_month = monthly
        .iter()
        .fold(PeakMonth::default(), |peak, entry| {
            if entry.total > peak.amount {
                PeakMonth {
                    month: Some(entry.month),
                    amount: entry.total,
                }
            } else {
                peak
            }
        });

    let mut top_spending_category = TopCategory::default();
    for entry in categories.iter() {
        if entry.total > top_spending_category.amount {
            top_spending_category = TopCategory {
                category: entry.category.clone(),
                amount: entry.total,
            };
        }
    }

    Insights {
        total_spending,
        avg_monthly_spending,
        highest_spending_month,
        top_spending_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, CategoryIndex, ExpenseLedger};
    use crate::reports::{category_totals, monthly_totals};

    #[test]
    fn test_empty_defaults() {
        let view = insights(&MonthlyTotals::zero(), &CategoryTotals::default(), 0).view();
        assert_eq!(view.total_spending, "0.00");
        assert_eq!(view.avg_monthly_spending, "0.00");
        assert_eq!(view.highest_spending_month.month, "");
        assert_eq!(view.highest_spending_month.amount, "0.00");
        assert_eq!(view.top_spending_category.category, "");
        assert_eq!(view.top_spending_category.amount, "0.00");
    }

    #[test]
    fn test_scenario() {
        let mut ledger = ExpenseLedger::new();
        ledger.insert(Month::January, "Rent", Amount::new(1000.0));
        ledger.insert(Month::January, "Food", Amount::new(200.0));
        ledger.insert(Month::February, "Rent", Amount::new(1000.0));
        let mut categories = CategoryIndex::new();
        categories.add_category("Housing").unwrap();
        categories.assign("Housing", "Rent").unwrap();

        let monthly = monthly_totals(&ledger);
        let view = insights(
            &monthly,
            &category_totals(&ledger, &categories),
            ledger.month_count(),
        )
        .view();

        assert_eq!(view.total_spending, "2200.00");
        assert_eq!(view.avg_monthly_spending, "1100.00");
        assert_eq!(view.highest_spending_month.month, "January");
        assert_eq!(view.highest_spending_month.amount, "1200.00");
        assert_eq!(view.top_spending_category.category, "Housing");
        assert_eq!(view.top_spending_category.amount, "2000.00");
    }

    #[test]
    fn test_average_counts_months_without_spending() {
        let ledger: ExpenseLedger = serde_json::from_str(
            r#"{"january": {"Rent": 1000}, "february": {"Refund": "abc"}}"#,
        )
        .unwrap();
        let monthly = monthly_totals(&ledger);
        let result = insights(
            &monthly,
            &category_totals(&ledger, &CategoryIndex::new()),
            ledger.month_count(),
        );

        assert_eq!(ledger.month_count(), 2);
        assert_eq!(result.view().avg_monthly_spending, "500.00");
        assert_eq!(result.highest_spending_month.month, Some(Month::January));
    }

    #[test]
    fn test_ties_go_to_first() {
        let monthly = MonthlyTotals::from_pairs([(Month::March, 50.0), (Month::May, 50.0)]);
        let categories = CategoryTotals::from_pairs([("Alpha", 10.0), ("Beta", 10.0)]);
        let result = insights(&monthly, &categories, 2);
        assert_eq!(result.highest_spending_month.month, Some(Month::March));
        assert_eq!(result.top_spending_category.category, "Alpha");
    }

    #[test]
    fn test_rounding_only_at_presentation() {
        let monthly = MonthlyTotals::from_pairs([
            (Month::January, 0.004),
            (Month::February, 0.004),
        ]);
        let result = insights(&monthly, &CategoryTotals::default(), 2);
        assert!((result.total_spending - 0.008).abs() < 1e-12);
        assert_eq!(result.view().total_spending, "0.01");
    }
}
