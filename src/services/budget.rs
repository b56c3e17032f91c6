//! Budget status of a single month
//!
//! Asks the tracker server first and computes from local data when it
//! cannot answer.

use tracing::warn;

use crate::models::Month;
use crate::remote::TrackerSource;
use crate::reports::{budget_status, BudgetStatus};
use crate::sync::{DataOrigin, SyncController};

/// Service for budget checks
pub struct BudgetService<'a, S> {
    controller: &'a SyncController<S>,
}

impl<'a, S: TrackerSource> BudgetService<'a, S> {
    pub fn new(controller: &'a SyncController<S>) -> Self {
        Self { controller }
    }

    /// Spending against the budget of `month`, and where it was computed
    pub async fn status(&self, month: Month) -> (BudgetStatus, DataOrigin) {
        match self.controller.source().check_budget(month).await {
            Ok(remote) => (remote.into_status(month), DataOrigin::Remote),
            Err(err) => {
                warn!(error = %err, month = %month, "Remote budget check failed, using local data");
                let status = self
                    .controller
                    .with_local(|data| budget_status(&data.expenses, &data.budgets, month));
                (status, DataOrigin::Local)
            }
        }
    }
}
