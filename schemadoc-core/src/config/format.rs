//! Output format selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target syntax of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text report with underlined headings
    #[default]
    Text,
    /// HTML report document
    Html,
    /// Graphviz DOT diagram
    Dot,
}

impl OutputFormat {
    /// True for the report formats handled by the tabular formatter
    pub const fn is_tabular(self) -> bool {
        matches!(self, Self::Text | Self::Html)
    }

    /// True if text written to this format must be markup-escaped
    pub const fn is_markup(self) -> bool {
        matches!(self, Self::Html | Self::Dot)
    }

    /// Conventional file extension for the format
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Html => "html",
            Self::Dot => "dot",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Html => write!(f, "html"),
            Self::Dot => write!(f, "dot"),
        }
    }
}
