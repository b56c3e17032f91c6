//! Configuration
//!
//! - Path resolution for settings and the local data cache
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::{Settings, SERVER_ENV_VAR};
