//! Logging setup for the schemadoc front end.
//!
//! Diagnostics go to stderr through `tracing`; rendered documents only ever
//! go to the caller's sink, so the two streams never mix.

use crate::Result;

/// Maps command-line verbosity flags to a tracing level.
///
/// `quiet` wins over any verbosity; otherwise 0 is INFO, 1 is DEBUG and
/// anything higher is TRACE.
pub const fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Initializes structured logging based on verbosity level.
///
/// # Example
/// ```rust,no_run
/// use schemadoc_core::logging::init_logging;
///
/// init_logging(1, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| {
            crate::error::SchemaDocError::configuration(format!(
                "Failed to initialize logging: {}",
                e
            ))
        })?;

    Ok(())
}
