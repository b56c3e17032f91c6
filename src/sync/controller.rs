//! Sync/fallback controller
//!
//! Owns the cached remote snapshot and the local data it falls back to.
//! The lock around both is only ever held between awaits, so refreshes and
//! reads can interleave freely; whichever refresh completes last wins.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use tracing::{debug, error, info, warn};

use crate::error::TrackerResult;
use crate::models::{ExpenseLedger, Month, TrackerData};
use crate::remote::TrackerSource;
use crate::reports::BudgetComparison;

use super::snapshot::AnalyticsSnapshot;

/// Freshness of the cached remote snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// No usable remote snapshot; reads compute locally
    #[default]
    Stale,
    /// A refresh is in flight; reads compute locally
    Refreshing,
    /// The cached remote snapshot is served
    Fresh,
}

/// What a failed refresh does to the previous snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Drop it and fall back to local data
    #[default]
    Discard,
    /// Keep serving it
    RetainLast,
}

#[derive(Debug, Default)]
struct Inner {
    state: SyncState,
    cached: Option<AnalyticsSnapshot>,
    local: TrackerData,
    last_refreshed: Option<DateTime<Utc>>,
}

/// Serves analytics from the tracker server when possible and from local
/// data otherwise
pub struct SyncController<S> {
    source: S,
    policy: FailurePolicy,
    inner: Mutex<Inner>,
}

impl<S: TrackerSource> SyncController<S> {
    /// Create a controller with the default failure policy
    pub fn new(source: S) -> Self {
        Self::with_policy(source, FailurePolicy::default())
    }

    pub fn with_policy(source: S, policy: FailurePolicy) -> Self {
        Self {
            source,
            policy,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// The remote source
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current freshness
    pub fn state(&self) -> SyncState {
        self.lock().state
    }

    /// When the last successful refresh completed
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.lock().last_refreshed
    }

    /// Fetch monthly trends, category breakdown and insights concurrently
    ///
    /// Fails as soon as any of the three fetches fails. The error is returned
    /// after the cache has been updated according to the failure policy.
    pub async fn refresh(&self) -> TrackerResult<AnalyticsSnapshot> {
        self.lock().state = SyncState::Refreshing;
        debug!("Refreshing analytics from tracker server");

        let result = futures::try_join!(
            self.source.monthly_trends(),
            self.source.category_breakdown(),
            self.source.insights()
        );

        let mut inner = self.lock();
        match result {
            Ok((trends, breakdown, remote)) => {
                let snapshot = AnalyticsSnapshot::from_remote(&trends, &breakdown, &remote);
                inner.cached = Some(snapshot.clone());
                inner.state = SyncState::Fresh;
                inner.last_refreshed = Some(snapshot.fetched_at);
                info!(
                    categories = snapshot.category_totals.len(),
                    total = snapshot.insights.total_spending,
                    "Analytics refreshed from tracker server"
                );
                Ok(snapshot)
            }
            Err(err) => {
                error!(error = %err, "Failed to refresh analytics, using local data");
                match self.policy {
                    FailurePolicy::Discard => {
                        inner.cached = None;
                        inner.state = SyncState::Stale;
                    }
                    FailurePolicy::RetainLast => {
                        inner.state = if inner.cached.is_some() {
                            SyncState::Fresh
                        } else {
                            SyncState::Stale
                        };
                    }
                }
                Err(err)
            }
        }
    }

    /// The cached remote snapshot when fresh, otherwise a local computation
    pub fn snapshot(&self) -> AnalyticsSnapshot {
        let inner = self.lock();
        if inner.state == SyncState::Fresh {
            if let Some(cached) = &inner.cached {
                return cached.clone();
            }
        }
        AnalyticsSnapshot::compute(&inner.local)
    }

    /// Discard the cached snapshot
    pub fn clear_cache(&self) {
        let mut inner = self.lock();
        inner.cached = None;
        inner.state = SyncState::Stale;
    }

    /// Budget versus actual, using whichever monthly totals are current
    pub fn budget_comparison(&self) -> BudgetComparison {
        let snapshot = self.snapshot();
        self.with_local(|data| snapshot.budget_comparison(&data.budgets))
    }

    /// Copy of the local data
    pub fn local(&self) -> TrackerData {
        self.lock().local.clone()
    }

    /// Read the local data without copying it
    pub fn with_local<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TrackerData) -> R,
    {
        f(&self.lock().local)
    }

    /// Replace the local data in full
    pub fn replace_local(&self, data: TrackerData) {
        self.lock().local = data;
    }

    /// Modify the local data in place
    pub fn update_local<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TrackerData) -> R,
    {
        f(&mut self.lock().local)
    }

    /// Load every month, the category index and the budget table from the
    /// tracker server and replace the local data with them
    pub async fn reload_local(&self) -> TrackerResult<()> {
        let months = try_join_all(Month::ALL.into_iter().map(|month| async move {
            self.source
                .list_expenses(month)
                .await
                .map(|expenses| (month, expenses))
        }));

        let (months, categories, budgets) = futures::try_join!(
            months,
            self.source.list_categories(),
            self.source.list_budgets()
        )?;

        let mut expenses = ExpenseLedger::new();
        for (month, list) in months {
            expenses.replace_month(month, list);
        }

        for (expense, claimants) in categories.overlaps() {
            warn!(
                expense = %expense,
                categories = ?claimants,
                "Expense claimed by several categories; the first by name applies"
            );
        }

        info!(
            expenses = expenses.expense_count(),
            categories = categories.len(),
            "Loaded local data from tracker server"
        );
        self.replace_local(TrackerData::new(expenses, categories, budgets));
        Ok(())
    }
}
