//! Formatter lifecycle contract.
//!
//! Every formatter is driven through the same fixed sequence of callbacks:
//! `begin`, an optional header region, the metadata handlers, an optional
//! info region, and `end`. A formatter must produce well-formed output for
//! any combination of suppressed sections. A `None` record means the
//! corresponding collection phase did not run. It is never an error, and a
//! handler given `None` writes nothing.

use crate::error::{Result, SchemaDocError};
use crate::models::{CrawlInfo, DatabaseInfo, DriverInfo, ToolInfo};

/// Where a formatter is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Constructed, `begin` not yet called
    #[default]
    Idle,
    /// Between `begin` and `end`
    Open,
    /// `end` has run; the sink is released
    Closed,
}

impl LifecycleState {
    /// Lowercase state name for messages
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Moves `Idle` to `Open`.
    ///
    /// # Errors
    /// Returns a lifecycle error if `begin` already ran
    pub fn begin(&mut self) -> Result<()> {
        self.transition("begin", Self::Idle, Self::Open)
    }

    /// Moves `Open` to `Closed`.
    ///
    /// # Errors
    /// Returns a lifecycle error unless the formatter is open
    pub fn end(&mut self) -> Result<()> {
        self.transition("end", Self::Open, Self::Closed)
    }

    /// Checks that a callback may run.
    ///
    /// # Errors
    /// Returns a lifecycle error unless the formatter is open
    pub fn require_open(self, operation: &'static str) -> Result<()> {
        if self == Self::Open {
            Ok(())
        } else {
            Err(SchemaDocError::Lifecycle {
                operation,
                expected: Self::Open.as_str(),
                actual: self.as_str(),
            })
        }
    }

    fn transition(&mut self, operation: &'static str, from: Self, to: Self) -> Result<()> {
        if *self != from {
            return Err(SchemaDocError::Lifecycle {
                operation,
                expected: from.as_str(),
                actual: self.as_str(),
            });
        }
        tracing::debug!("Formatter {} -> {}", from.as_str(), to.as_str());
        *self = to;
        Ok(())
    }
}

/// Callbacks every document formatter implements.
///
/// `begin` must be called exactly once before any other callback, and `end`
/// must run on every exit path so the sink is terminated and released; use
/// [`crate::render::render`] to get both guarantees.
pub trait Formatter {
    /// Writes the document preamble
    fn begin(&mut self) -> Result<()>;

    /// Opens the header region
    fn handle_header_start(&mut self) -> Result<()>;

    /// Closes the header region; suppressed under the same condition as
    /// [`handle_header_start`](Self::handle_header_start)
    fn handle_header_end(&mut self) -> Result<()>;

    /// Writes the title and crawl summary
    fn handle_crawl_info(&mut self, crawl_info: Option<&CrawlInfo>) -> Result<()>;

    /// Writes database server details
    fn handle_database_info(&mut self, database_info: Option<&DatabaseInfo>) -> Result<()>;

    /// Writes driver details
    fn handle_driver_info(&mut self, driver_info: Option<&DriverInfo>) -> Result<()>;

    /// Writes details of the tool that produced the snapshot
    fn handle_tool_info(&mut self, tool_info: Option<&ToolInfo>) -> Result<()>;

    /// Opens the info region
    fn handle_info_start(&mut self) -> Result<()>;

    /// Closes the info region
    fn handle_info_end(&mut self) -> Result<()>;

    /// Writes closing markers and releases the sink
    fn end(&mut self) -> Result<()>;
}
