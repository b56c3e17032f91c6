//! Response shapes of the tracker server
//!
//! Every numeric field goes through [`Amount`], so malformed numbers from the
//! server read as zero rather than failing the whole response.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Amount, ExpenseRecord, Month, UNCATEGORIZED};
use crate::reports::BudgetStatus;

/// One row of `/analytics/monthly_trends`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub total: Amount,
}

/// One row of `/analytics/category_breakdown`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub total: Amount,
}

/// Month part of `/analytics/insights`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemoteMonthAmount {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub amount: Amount,
}

/// Category part of `/analytics/insights`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemoteCategoryAmount {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Amount,
}

/// Body of `/analytics/insights`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteInsights {
    pub total_spending: Amount,
    pub avg_monthly_spending: Amount,
    pub highest_spending_month: RemoteMonthAmount,
    pub top_spending_category: RemoteCategoryAmount,
}

/// Body of `/check_budget/<month>`
///
/// The server's `remaining` is not read back: [`Amount`] floors negatives,
/// so the remainder is recomputed from the other two fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteBudgetStatus {
    pub total_spent: Amount,
    pub budget: Amount,
}

impl RemoteBudgetStatus {
    pub fn into_status(self, month: Month) -> BudgetStatus {
        let total_spent = self.total_spent.value();
        let budget = self.budget.value();
        BudgetStatus {
            month,
            total_spent,
            budget,
            remaining: budget - total_spent,
        }
    }
}

/// One row of `/analytics/search_expenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteExpenseRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub month: String,
    pub expense_name: String,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
}

impl RemoteExpenseRecord {
    /// Convert to a domain record; None when the month is not recognised
    pub fn into_record(self) -> Option<ExpenseRecord> {
        let month = match self.month.parse::<Month>() {
            Ok(month) => month,
            Err(_) => {
                warn!(month = %self.month, name = %self.expense_name, "Dropping search hit with unknown month");
                return None;
            }
        };
        Some(ExpenseRecord {
            month,
            name: self.expense_name,
            amount: self.amount.value(),
            category: self
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
        })
    }
}
