//! Aggregation engine
//!
//! Pure functions that turn the ledger, category index and budget table into
//! totals, breakdowns and insights. None of them fail: malformed amounts
//! were already coerced to zero when the data was read.

pub mod budget_comparison;
pub mod category_breakdown;
pub mod category_trends;
pub mod insights;
pub mod monthly;

pub use budget_comparison::{budget_comparison, budget_status, BudgetComparison, BudgetStatus};
pub use category_breakdown::{category_expenses, category_totals, CategoryTotal, CategoryTotals};
pub use category_trends::{category_trends, CategoryTrend};
pub use insights::{
    insights, CategoryAmountView, Insights, InsightsView, MonthAmountView, PeakMonth, TopCategory,
};
pub use monthly::{month_summary, monthly_totals, MonthlyTotal, MonthlyTotals};
