//! Terminal views of analytics snapshots and budget comparisons

use crate::reports::{BudgetComparison, BudgetStatus};
use crate::sync::{AnalyticsSnapshot, DataOrigin};

use super::report::{format_bar, format_percentage, money, truncate};

const WIDTH: usize = 64;
const BAR_WIDTH: usize = 20;

/// Format a full snapshot: monthly trend, category breakdown and insights
pub fn format_snapshot(snapshot: &AnalyticsSnapshot, symbol: &str) -> String {
    let mut output = String::new();

    let origin = match snapshot.source {
        DataOrigin::Remote => "tracker server",
        DataOrigin::Local => "local data",
    };
    output.push_str(&format!(
        "Expense Analytics ({}, {})\n",
        origin,
        snapshot.fetched_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&"=".repeat(WIDTH));
    output.push('\n');

    // Monthly trend
    output.push_str("\nMONTHLY SPENDING\n");
    output.push_str(&"-".repeat(WIDTH));
    output.push('\n');
    let peak = snapshot
        .monthly_totals
        .iter()
        .map(|m| m.total)
        .fold(0.0, f64::max);
    for entry in snapshot.monthly_totals.iter() {
        output.push_str(&format!(
            "{:<10} {:>14}  {}\n",
            entry.month.display_name(),
            money(symbol, entry.total),
            format_bar(entry.total, peak, BAR_WIDTH)
        ));
    }

    // Categories
    output.push_str("\nSPENDING BY CATEGORY\n");
    output.push_str(&"-".repeat(WIDTH));
    output.push('\n');
    if snapshot.category_totals.is_empty() {
        output.push_str("No spending recorded.\n");
    } else {
        let total = snapshot.category_totals.total();
        for entry in snapshot.category_totals.ranked() {
            output.push_str(&format!(
                "{:<24} {:>14} {:>7}\n",
                truncate(&entry.category, 24),
                money(symbol, entry.total),
                format_percentage(entry.total / total * 100.0)
            ));
        }
    }

    // Insights
    let insights = &snapshot.insights;
    output.push_str("\nINSIGHTS\n");
    output.push_str(&"-".repeat(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Total Spending:          {}\n",
        money(symbol, insights.total_spending)
    ));
    output.push_str(&format!(
        "Average Monthly:         {}\n",
        money(symbol, insights.avg_monthly_spending)
    ));
    match insights.highest_spending_month.month {
        Some(month) => output.push_str(&format!(
            "Highest Spending Month:  {} ({})\n",
            month.display_name(),
            money(symbol, insights.highest_spending_month.amount)
        )),
        None => output.push_str("Highest Spending Month:  -\n"),
    }
    if insights.top_spending_category.category.is_empty() {
        output.push_str("Top Category:            -\n");
    } else {
        output.push_str(&format!(
            "Top Category:            {} ({})\n",
            insights.top_spending_category.category,
            money(symbol, insights.top_spending_category.amount)
        ));
    }

    output
}

/// Format budget versus actual spending per month
pub fn format_budget_comparison(comparison: &BudgetComparison, symbol: &str) -> String {
    if comparison.is_empty() {
        return "No budgets or spending recorded.".to_string();
    }

    let mut output = String::new();
    output.push_str("Budget vs Actual\n");
    output.push_str(&"=".repeat(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<10} {:>14} {:>14} {:>14}\n",
        "Month", "Budget", "Actual", "Remaining"
    ));
    output.push_str(&"-".repeat(WIDTH));
    output.push('\n');

    for (month, budget, actual) in comparison.rows() {
        let remaining = if budget > 0.0 {
            money(symbol, budget - actual)
        } else {
            "-".to_string()
        };
        let flag = if budget > 0.0 && actual > budget {
            "  OVER"
        } else {
            ""
        };
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}{}\n",
            month,
            money(symbol, budget),
            money(symbol, actual),
            remaining,
            flag
        ));
    }

    output
}

/// Format the budget status of a single month
pub fn format_budget_status(status: &BudgetStatus, symbol: &str) -> String {
    let mut output = format!(
        "{}: spent {} of {}, {} remaining\n",
        status.month.display_name(),
        money(symbol, status.total_spent),
        money(symbol, status.budget),
        money(symbol, status.remaining)
    );
    if status.is_over_budget() {
        output.push_str("Over budget!\n");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Month, TrackerData};
    use crate::reports::budget_status;

    fn data() -> TrackerData {
        serde_json::from_str(
            r#"{
                "expenses": {"january": {"Rent": 1000, "Food": 200}, "february": {"Rent": 1000}},
                "categories": {"Housing": ["Rent"]},
                "budgets": {"january": 1500, "february": 800}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_format_snapshot() {
        let snapshot = AnalyticsSnapshot::compute(&data());
        let output = format_snapshot(&snapshot, "$");

        assert!(output.contains("local data"));
        assert!(output.contains("January"));
        assert!(output.contains("$1200.00"));
        assert!(output.contains("Housing"));
        assert!(output.contains("Total Spending:          $2200.00"));
        assert!(output.contains("Top Category:            Housing ($2000.00)"));
    }

    #[test]
    fn test_format_empty_snapshot() {
        let snapshot = AnalyticsSnapshot::compute(&TrackerData::default());
        let output = format_snapshot(&snapshot, "$");
        assert!(output.contains("No spending recorded."));
        assert!(output.contains("Highest Spending Month:  -"));
    }

    #[test]
    fn test_format_budget_comparison() {
        let data = data();
        let snapshot = AnalyticsSnapshot::compute(&data);
        let output = format_budget_comparison(&snapshot.budget_comparison(&data.budgets), "$");

        assert!(output.contains("Budget vs Actual"));
        assert!(output.lines().any(|l| l.starts_with("February") && l.ends_with("OVER")));
        assert!(!output.lines().any(|l| l.starts_with("January") && l.ends_with("OVER")));
    }

    #[test]
    fn test_format_budget_status() {
        let data = data();
        let status = budget_status(&data.expenses, &data.budgets, Month::February);
        let output = format_budget_status(&status, "€");
        assert!(output.starts_with("February: spent €1000.00 of €800.00, €-200.00 remaining"));
        assert!(output.contains("Over budget!"));
    }
}
