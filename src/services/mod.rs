//! Service layer
//!
//! Validation and mutation flows on top of the sync controller: changes go
//! to the tracker server first and are mirrored locally once accepted.

pub mod budget;
pub mod expense;
pub mod import;
pub mod search;

pub use budget::BudgetService;
pub use expense::ExpenseService;
pub use import::{
    import_budgets, import_categories, import_expenses, ImportService, ImportSummary,
    PushSummary, RowError,
};
pub use search::{filter_local, SearchResults, SearchService};
