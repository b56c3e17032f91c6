//! Core data models for expense analytics
//!
//! This module contains the data structures the aggregation engine works on:
//! months, amounts, the expense ledger, the category index and the budget
//! table.

pub mod amount;
pub mod budget;
pub mod category;
pub mod data;
pub mod ledger;
pub mod month;
pub mod search;

pub use amount::Amount;
pub use budget::BudgetTable;
pub use category::{CategoryIndex, UNCATEGORIZED};
pub use data::{ClearScope, TrackerData};
pub use ledger::{ExpenseLedger, MonthExpenses};
pub use month::{Month, MonthParseError};
pub use search::{ExpenseRecord, SearchQuery};
