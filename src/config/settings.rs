//! User settings
//!
//! Stored as JSON in the config directory. Missing fields take their
//! defaults, so older files keep loading.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::remote::DEFAULT_SERVER_URL;
use crate::sync::FailurePolicy;

/// Environment variable that overrides the configured server URL
pub const SERVER_ENV_VAR: &str = "EXPENSE_ANALYTICS_SERVER";

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the tracker server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Keep serving the last remote snapshot when a refresh fails
    #[serde(default)]
    pub retain_snapshot_on_failure: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            server_url: default_server_url(),
            request_timeout_secs: default_timeout_secs(),
            currency_symbol: default_currency(),
            retain_snapshot_on_failure: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        let settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TrackerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            Settings::default()
        };

        Ok(settings)
    }

    /// Server URL to connect to
    ///
    /// `EXPENSE_ANALYTICS_SERVER` takes precedence over the stored URL for
    /// this process only; it is never written back to the settings file.
    pub fn effective_server_url(&self) -> String {
        self.server_url_with(std::env::var(SERVER_ENV_VAR).ok())
    }

    fn server_url_with(&self, env_override: Option<String>) -> String {
        env_override
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.server_url.clone())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TrackerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            TrackerError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// HTTP request timeout; zero is treated as one second
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// What a failed refresh does to the cached snapshot
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.retain_snapshot_on_failure {
            FailurePolicy::RetainLast
        } else {
            FailurePolicy::Discard
        }
    }
}
