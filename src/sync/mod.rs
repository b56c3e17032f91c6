//! Remote-first analytics with local fallback
//!
//! [`SyncController`] serves the tracker server's aggregates while they are
//! fresh and recomputes from local data whenever they are not.

pub mod controller;
pub mod snapshot;

pub use controller::{FailurePolicy, SyncController, SyncState};
pub use snapshot::{AnalyticsSnapshot, DataOrigin};
