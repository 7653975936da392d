//! Log subscriber setup
//!
//! Logs go to stderr so command output on stdout stays machine-readable.
//! `RUST_LOG` wins over the verbosity flag.

use crate::error::{ClientError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "mldash_cli=debug,mldash=debug"
    } else {
        "mldash_cli=info,mldash=info"
    }
}

/// Install the global subscriber
pub fn init(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .map_err(|e| ClientError::Internal(format!("invalid log filter: {e}")))?;

    fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ClientError::Internal(format!("failed to install log subscriber: {e}")))
}
