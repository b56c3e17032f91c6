//! Expense Analytics - aggregation engine and sync/fallback controller for a
//! personal expense tracker
//!
//! Expenses are recorded per calendar month, optionally grouped into
//! categories and compared against monthly budgets. Aggregates come from the
//! tracker server while it is reachable and are recomputed locally when it
//! is not.
//!
//! # Architecture
//!
//! - `models`: months, amounts, the expense ledger, category index and budgets
//! - `reports`: pure aggregation (monthly totals, category breakdown, budget
//!   comparison, insights)
//! - `remote`: the tracker server interface and its HTTP client
//! - `sync`: snapshots and the controller choosing remote or local figures
//! - `services`: validated mutations, search with local fallback, CSV import
//! - `export` / `display`: output formats and terminal views
//! - `config` / `cache`: settings, paths and the on-disk copy of local data
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_analytics::remote::HttpTrackerSource;
//! use expense_analytics::sync::SyncController;
//!
//! let source = HttpTrackerSource::new("http://127.0.0.1:5000", Duration::from_secs(10))?;
//! let controller = SyncController::new(source);
//! controller.reload_local().await?;
//! let _ = controller.refresh().await;
//! let snapshot = controller.snapshot();
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod remote;
pub mod reports;
pub mod services;
pub mod sync;

pub use error::{TrackerError, TrackerResult};
pub use models::{Amount, BudgetTable, CategoryIndex, ExpenseLedger, Month, TrackerData};
pub use sync::{AnalyticsSnapshot, DataOrigin, SyncController, SyncState};
