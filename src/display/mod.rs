//! Display formatting for terminal output

pub mod report;
pub mod search;
pub mod snapshot;

pub use search::format_search_results;
pub use snapshot::{format_budget_comparison, format_budget_status, format_snapshot};
