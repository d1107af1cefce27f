//! Render options.
//!
//! This module provides the `RenderOptions` struct that decides which
//! sections a formatter writes.

use crate::color::Color;
use crate::info_level::InfoLevel;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Flat, insertion-ordered `prefix.attribute` to value map for the DOT header
pub type GraphvizAttributes = IndexMap<String, String>;

/// Graph, node and edge attributes every diagram starts from.
pub fn default_graphviz_attributes() -> GraphvizAttributes {
    [
        ("graph.fontname", "Helvetica"),
        ("graph.labeljust", "r"),
        ("graph.nodesep", "0.18"),
        ("graph.ranksep", "0.46"),
        ("graph.rankdir", "RL"),
        ("node.fontname", "Helvetica"),
        ("node.fontsize", "10"),
        ("node.shape", "none"),
        ("edge.fontname", "Helvetica"),
        ("edge.fontsize", "8"),
        ("edge.arrowsize", "0.8"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}

/// Options controlling one render pass.
///
/// Every `no_*` flag only removes output. `verbose_database_info` gates the
/// detailed database, driver and tool sections of the tabular report
/// independently of the per-section `show_*` flags.
///
/// # Example
/// ```rust
/// use schemadoc_core::config::RenderOptions;
///
/// let options = RenderOptions::new()
///     .with_title("Inventory")
///     .with_show_database_info(true);
///
/// assert_eq!(options.title(), Some("Inventory"));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Document title; blank titles count as absent
    pub title: Option<String>,
    /// Suppress the document start marker
    pub no_header: bool,
    /// Suppress the document end marker
    pub no_footer: bool,
    /// Suppress the system information rows and sections
    pub no_info: bool,
    /// Suppress the "generated by/on" rows and the tool section
    #[serde(alias = "no_schema_crawler_info")]
    pub no_tool_info: bool,
    /// Show the database version row and database section
    pub show_database_info: bool,
    /// Show the driver version row and driver section
    #[serde(alias = "show_jdbc_driver_info")]
    pub show_driver_info: bool,
    /// Whether the snapshot carries detailed database, driver and tool records
    pub verbose_database_info: bool,
    /// Diagram header attributes, keyed `graph.*`, `node.*` or `edge.*`
    pub graphviz_attributes: GraphvizAttributes,
    /// Border color of the diagram title block
    pub label_color: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            no_header: false,
            no_footer: false,
            no_info: false,
            no_tool_info: false,
            show_database_info: false,
            show_driver_info: false,
            verbose_database_info: false,
            graphviz_attributes: default_graphviz_attributes(),
            label_color: Color::default(),
        }
    }
}

impl RenderOptions {
    /// Creates render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses render options from JSON; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns a serialization error for malformed JSON, or a configuration
    /// error if the parsed options fail validation
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let options: Self = serde_json::from_str(json).map_err(|e| {
            crate::error::SchemaDocError::serialization("Failed to parse render options", e)
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Validates the options.
    ///
    /// # Errors
    /// Returns error if a graphviz attribute value contains a line break,
    /// which would split its line in the diagram header
    pub fn validate(&self) -> crate::Result<()> {
        if let Some((key, _)) = self
            .graphviz_attributes
            .iter()
            .find(|(_, value)| value.contains(['\n', '\r']))
        {
            return Err(crate::error::SchemaDocError::configuration(format!(
                "graphviz attribute '{}' must not contain line breaks",
                key
            )));
        }

        Ok(())
    }

    /// The title, if one is set and not blank
    pub fn title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
    }

    /// True if a non-blank title is set
    pub fn has_title(&self) -> bool {
        self.title().is_some()
    }

    /// True if the diagram title block has anything to show
    pub fn has_title_block(&self) -> bool {
        self.has_title() || !self.no_info
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to enable/disable the document start marker.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Builder method to enable/disable the document end marker.
    pub fn with_no_footer(mut self, no_footer: bool) -> Self {
        self.no_footer = no_footer;
        self
    }

    /// Builder method to suppress system information.
    pub fn with_no_info(mut self, no_info: bool) -> Self {
        self.no_info = no_info;
        self
    }

    /// Builder method to suppress tool information.
    pub fn with_no_tool_info(mut self, no_tool_info: bool) -> Self {
        self.no_tool_info = no_tool_info;
        self
    }

    /// Builder method to show database information.
    pub fn with_show_database_info(mut self, show: bool) -> Self {
        self.show_database_info = show;
        self
    }

    /// Builder method to show driver information.
    pub fn with_show_driver_info(mut self, show: bool) -> Self {
        self.show_driver_info = show;
        self
    }

    /// Builder method to set verbose database info directly.
    pub fn with_verbose_database_info(mut self, verbose: bool) -> Self {
        self.verbose_database_info = verbose;
        self
    }

    /// Builder method to derive verbose database info from an info level.
    pub fn with_info_level(mut self, info_level: InfoLevel) -> Self {
        self.verbose_database_info = info_level.is_verbose_database_info();
        self
    }

    /// Builder method to set or replace one graphviz attribute.
    pub fn with_graphviz_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.graphviz_attributes.insert(key.into(), value.into());
        self
    }

    /// Builder method to replace all graphviz attributes.
    pub fn with_graphviz_attributes(mut self, attributes: GraphvizAttributes) -> Self {
        self.graphviz_attributes = attributes;
        self
    }

    /// Builder method to set the diagram title block color.
    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }
}
