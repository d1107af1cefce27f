//! How much detail a snapshot was collected with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Detail level of a collection run.
///
/// Only `Maximum` collects the extra database, driver and tool records, so
/// only `Maximum` turns on verbose database info in the tabular report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoLevel {
    #[default]
    Unknown,
    Minimum,
    Standard,
    Detailed,
    Maximum,
}

impl InfoLevel {
    /// All levels, from least to most detailed
    pub const ALL: [Self; 5] = [
        Self::Unknown,
        Self::Minimum,
        Self::Standard,
        Self::Detailed,
        Self::Maximum,
    ];

    /// Lowercase name used in configuration and on the command line
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Minimum => "minimum",
            Self::Standard => "standard",
            Self::Detailed => "detailed",
            Self::Maximum => "maximum",
        }
    }

    /// Parses a level name, falling back to `Unknown` for anything
    /// unrecognized.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == name.trim())
            .unwrap_or_else(|| {
                tracing::info!("Unknown infolevel <{}>", name);
                Self::Unknown
            })
    }

    /// True if this level collects database, driver and tool detail
    pub const fn is_verbose_database_info(self) -> bool {
        matches!(self, Self::Maximum)
    }
}

impl fmt::Display for InfoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfoLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}
