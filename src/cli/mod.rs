//! CLI command handlers
//!
//! Bridges clap argument parsing with the sync controller and services.

pub mod analytics;
pub mod category;
pub mod expense;
pub mod import;
pub mod search;

use tracing::warn;

use crate::cache::LocalCache;
use crate::config::{Settings, TrackerPaths};
use crate::error::TrackerResult;
use crate::remote::{HttpTrackerSource, TrackerSource};
use crate::sync::SyncController;

pub use analytics::{
    handle_analyze_command, handle_budget_command, handle_export_command,
    handle_snapshot_command, AnalyzeArgs, ExportArgs, ExportFormat,
};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ClearTarget, ExpenseCommand};
pub use import::{handle_import_command, ImportArgs};
pub use search::{handle_search_command, SearchArgs};

/// Paths and settings shared by every command
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: TrackerPaths,
    pub settings: Settings,
}

impl CliContext {
    /// Resolve paths and load settings
    pub fn load() -> TrackerResult<Self> {
        let paths = TrackerPaths::new()?;
        let settings = Settings::load_or_create(&paths)?;
        Ok(Self { paths, settings })
    }

    /// Controller talking to the configured tracker server
    pub fn controller(&self) -> TrackerResult<SyncController<HttpTrackerSource>> {
        let source = HttpTrackerSource::new(
            &self.settings.effective_server_url(),
            self.settings.request_timeout(),
        )?;
        Ok(SyncController::with_policy(
            source,
            self.settings.failure_policy(),
        ))
    }

    pub fn cache(&self) -> LocalCache {
        LocalCache::from_paths(&self.paths)
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Fill the controller's local data from the server, or from the cache
    /// file when the server cannot be reached
    ///
    /// Returns whether the data came from the server.
    pub async fn load_local<S: TrackerSource>(
        &self,
        controller: &SyncController<S>,
    ) -> TrackerResult<bool> {
        match controller.reload_local().await {
            Ok(()) => {
                if let Err(e) = self.cache().save(&controller.local()) {
                    warn!(error = %e, "Could not update local data cache");
                }
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Tracker server unavailable, using cached data");
                if let Some(data) = self.cache().load()? {
                    controller.replace_local(data);
                }
                Ok(false)
            }
        }
    }

    /// Persist the controller's local data after a mutation
    pub fn save_local<S: TrackerSource>(&self, controller: &SyncController<S>) {
        if let Err(e) = self.cache().save(&controller.local()) {
            warn!(error = %e, "Could not update local data cache");
        }
    }
}
