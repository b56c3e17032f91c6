//! The tracker server as seen by this crate

use async_trait::async_trait;

use crate::error::TrackerResult;
use crate::models::{
    BudgetTable, CategoryIndex, ClearScope, ExpenseRecord, Month, MonthExpenses, SearchQuery,
};

use super::wire::{CategoryPoint, RemoteBudgetStatus, RemoteInsights, TrendPoint};

/// Remote store of expenses, categories and budgets, plus its pre-aggregated
/// analytics
///
/// Mutations report success or failure only. Timeouts are the
/// implementation's concern.
#[async_trait]
pub trait TrackerSource: Send + Sync {
    /// Monthly totals as computed by the server, in any order
    async fn monthly_trends(&self) -> TrackerResult<Vec<TrendPoint>>;

    /// Category totals as computed by the server
    async fn category_breakdown(&self) -> TrackerResult<Vec<CategoryPoint>>;

    /// Summary insights as computed by the server
    async fn insights(&self) -> TrackerResult<RemoteInsights>;

    /// Ask the server to rebuild its analytics tables
    async fn sync_analytics(&self) -> TrackerResult<()>;

    /// Expenses recorded for one month
    async fn list_expenses(&self, month: Month) -> TrackerResult<MonthExpenses>;

    /// The category index
    async fn list_categories(&self) -> TrackerResult<CategoryIndex>;

    /// The budget table
    async fn list_budgets(&self) -> TrackerResult<BudgetTable>;

    /// Spending against the budget of one month, as computed by the server
    async fn check_budget(&self, month: Month) -> TrackerResult<RemoteBudgetStatus>;

    /// Record a new expense
    async fn add_expense(&self, month: Month, name: &str, amount: f64) -> TrackerResult<()>;

    /// Change the amount of an existing expense
    async fn update_expense(&self, month: Month, name: &str, amount: f64) -> TrackerResult<()>;

    /// Delete an expense
    async fn delete_expense(&self, month: Month, name: &str) -> TrackerResult<()>;

    /// Set the budget for a month
    async fn set_budget(&self, month: Month, amount: f64) -> TrackerResult<()>;

    /// Create an empty category
    async fn add_category(&self, name: &str) -> TrackerResult<()>;

    /// Assign an expense name to a category
    async fn assign_to_category(&self, category: &str, expense: &str) -> TrackerResult<()>;

    /// Delete a category and its assignments
    async fn delete_category(&self, name: &str) -> TrackerResult<()>;

    /// Empty expenses, categories, budgets or everything
    async fn clear(&self, scope: ClearScope) -> TrackerResult<()>;

    /// Server-side expense search
    async fn search(&self, query: &SearchQuery) -> TrackerResult<Vec<ExpenseRecord>>;
}
