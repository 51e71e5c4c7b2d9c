//! Logging System
//!
//! Structured logging via the `tracing` crate. The library only emits spans
//! and events; hosts install their own subscriber. [`init`] is a convenience
//! for binaries and tests that want output without wiring one up.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, e.g. `FIXTREE_LOG=debug`
/// or `FIXTREE_LOG=fixtree::walker=trace`.
pub const ENV_VAR: &str = "FIXTREE_LOG";

/// Install a formatting subscriber filtered by [`ENV_VAR`].
///
/// Falls back to `info` when the variable is unset or unparsable. Returns
/// false if a global subscriber was already installed, so repeated calls
/// are harmless.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
