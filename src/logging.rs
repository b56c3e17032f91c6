//! Tracing setup
//!
//! `RUST_LOG` takes precedence; otherwise only this crate logs, at `warn`
//! (or `debug` when verbose). Output goes to stderr so it never mixes with
//! exported data on stdout.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber; later calls do nothing
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let default = if verbose {
            "expense_analytics=debug"
        } else {
            "expense_analytics=warn"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
