//! Expense search query and result records

use serde::{Deserialize, Serialize};

use super::Month;

/// Filters for an expense search; unset filters match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Case-insensitive substring of the expense name
    pub text: Option<String>,
    /// Exact resolved category name ("Uncategorized" matches unassigned names)
    pub category: Option<String>,
    /// Exact month
    pub month: Option<Month>,
    /// Inclusive lower amount bound
    pub min_amount: Option<f64>,
    /// Inclusive upper amount bound
    pub max_amount: Option<f64>,
}

impl SearchQuery {
    /// Create a query matching every expense
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by name substring
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Filter by category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by month
    pub fn with_month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Filter by inclusive amount range
    pub fn with_amount_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    /// Check if every filter is unset
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty)
            && self.category.is_none()
            && self.month.is_none()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
    }
}

/// A single matched expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub month: Month,
    pub name: String,
    pub amount: f64,
    pub category: String,
}
