//! Diagnostic logging setup.
//!
//! Log lines go to stderr so they never mix with outputs written to stdout.

use crate::error::{ReleaseVarsError, Result};
use std::io;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a filter directive, e.g. `semver_release_vars=trace`
pub const LOG_ENV: &str = "RELEASE_VARS_LOG";

/// Filter used when [LOG_ENV] is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "semver_release_vars=debug"
    } else {
        "semver_release_vars=warn"
    }
}

/// Build the filter from [LOG_ENV], falling back to [default_directive]
pub fn build_filter(verbose: bool) -> Result<EnvFilter> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .map_err(|e| ReleaseVarsError::config(format!("invalid log filter: {}", e)))
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second subscriber is discarded.
pub fn init(verbose: bool) -> Result<()> {
    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose)?)
        .with(layer)
        .try_init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(())
}
