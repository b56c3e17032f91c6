//! In-memory [`TrackerSource`] for controller and service tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Amount, BudgetTable, CategoryIndex, ClearScope, ExpenseRecord, Month, MonthExpenses,
    SearchQuery, TrackerData,
};
use crate::reports::budget_status;

use super::source::TrackerSource;
use super::wire::{CategoryPoint, RemoteBudgetStatus, RemoteInsights, TrendPoint};

/// Canned server state plus switches that make calls fail
#[derive(Default)]
pub struct FakeSource {
    pub data: Mutex<TrackerData>,
    pub trends: Mutex<Vec<TrendPoint>>,
    pub breakdown: Mutex<Vec<CategoryPoint>>,
    pub insights: Mutex<RemoteInsights>,
    pub search_results: Mutex<Vec<ExpenseRecord>>,
    /// Analytics and search calls fail while set
    pub fail_analytics: AtomicBool,
    /// Only the insights call fails while set
    pub fail_insights: AtomicBool,
    /// Mutations fail while set
    pub fail_mutations: AtomicBool,
    /// Listing calls fail while set
    pub fail_listing: AtomicBool,
    pub mutations: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: TrackerData) -> Self {
        let source = Self::new();
        *source.data.lock().unwrap() = data;
        source
    }

    pub fn set_trends(&self, points: &[(&str, f64)]) {
        *self.trends.lock().unwrap() = points
            .iter()
            .map(|(month, total)| TrendPoint {
                month: month.to_string(),
                total: Amount::new(*total),
            })
            .collect();
    }

    pub fn set_breakdown(&self, points: &[(&str, f64)]) {
        *self.breakdown.lock().unwrap() = points
            .iter()
            .map(|(category, total)| CategoryPoint {
                category: category.to_string(),
                total: Amount::new(*total),
            })
            .collect();
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_analytics.store(failing, Ordering::SeqCst);
    }

    pub fn recorded(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }

    fn unavailable() -> TrackerError {
        TrackerError::Transport("connection refused".into())
    }

    fn check(flag: &AtomicBool) -> TrackerResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(Self::unavailable())
        } else {
            Ok(())
        }
    }

    fn record(&self, entry: String) -> TrackerResult<()> {
        Self::check(&self.fail_mutations)?;
        self.mutations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
        Ok(())
    }
}

#[async_trait]
impl TrackerSource for FakeSource {
    async fn monthly_trends(&self) -> TrackerResult<Vec<TrendPoint>> {
        Self::check(&self.fail_analytics)?;
        Ok(self.trends.lock().unwrap().clone())
    }

    async fn category_breakdown(&self) -> TrackerResult<Vec<CategoryPoint>> {
        Self::check(&self.fail_analytics)?;
        Ok(self.breakdown.lock().unwrap().clone())
    }

    async fn insights(&self) -> TrackerResult<RemoteInsights> {
        Self::check(&self.fail_analytics)?;
        Self::check(&self.fail_insights)?;
        Ok(self.insights.lock().unwrap().clone())
    }

    async fn sync_analytics(&self) -> TrackerResult<()> {
        self.record("sync".into())
    }

    async fn list_expenses(&self, month: Month) -> TrackerResult<MonthExpenses> {
        Self::check(&self.fail_listing)?;
        let data = self.data.lock().unwrap();
        Ok(data.expenses.month(month).cloned().unwrap_or_default())
    }

    async fn list_categories(&self) -> TrackerResult<CategoryIndex> {
        Self::check(&self.fail_listing)?;
        Ok(self.data.lock().unwrap().categories.clone())
    }

    async fn list_budgets(&self) -> TrackerResult<BudgetTable> {
        Self::check(&self.fail_listing)?;
        Ok(self.data.lock().unwrap().budgets.clone())
    }

    async fn check_budget(&self, month: Month) -> TrackerResult<RemoteBudgetStatus> {
        Self::check(&self.fail_analytics)?;
        let data = self.data.lock().unwrap();
        let status = budget_status(&data.expenses, &data.budgets, month);
        Ok(RemoteBudgetStatus {
            total_spent: Amount::new(status.total_spent),
            budget: Amount::new(status.budget),
        })
    }

    async fn add_expense(&self, month: Month, name: &str, amount: f64) -> TrackerResult<()> {
        self.record(format!("add {} {} {}", month.key(), name, amount))
    }

    async fn update_expense(&self, month: Month, name: &str, amount: f64) -> TrackerResult<()> {
        self.record(format!("update {} {} {}", month.key(), name, amount))
    }

    async fn delete_expense(&self, month: Month, name: &str) -> TrackerResult<()> {
        self.record(format!("delete {} {}", month.key(), name))
    }

    async fn set_budget(&self, month: Month, amount: f64) -> TrackerResult<()> {
        self.record(format!("budget {} {}", month.key(), amount))
    }

    async fn add_category(&self, name: &str) -> TrackerResult<()> {
        self.record(format!("category {}", name))
    }

    async fn assign_to_category(&self, category: &str, expense: &str) -> TrackerResult<()> {
        self.record(format!("assign {} {}", category, expense))
    }

    async fn delete_category(&self, name: &str) -> TrackerResult<()> {
        self.record(format!("delete-category {}", name))
    }

    async fn clear(&self, scope: ClearScope) -> TrackerResult<()> {
        self.record(format!("clear {}", scope.as_str()))
    }

    async fn search(&self, _query: &SearchQuery) -> TrackerResult<Vec<ExpenseRecord>> {
        Self::check(&self.fail_analytics)?;
        Ok(self.search_results.lock().unwrap().clone())
    }
}
