//! Command descriptors advertised to a command-line front end.
//!
//! A descriptor names a command and lists the options it accepts. Two
//! descriptors with the same name are the same command, even when their
//! option sets differ: identity is by name only.

use crate::error::{Result, SchemaDocError};
use indexmap::IndexMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Kind of value an option takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A switch that takes no value
    Flag,
    /// Free text
    Text,
    /// A whole number
    Integer,
    /// A filesystem path
    Path,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "flag"),
            Self::Text => write!(f, "text"),
            Self::Integer => write!(f, "integer"),
            Self::Path => write!(f, "path"),
        }
    }
}

/// One option of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOption {
    pub name: String,
    pub help_text: String,
    pub value_kind: ValueKind,
}

impl PluginOption {
    /// Creates an option
    pub fn new(name: impl Into<String>, help_text: impl Into<String>, value_kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            help_text: help_text.into(),
            value_kind,
        }
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.trim().is_empty())
}

/// A named command and the options it accepts
#[derive(Debug, Clone, Default)]
pub struct PluginDescriptor {
    name: Option<String>,
    help_header: Option<String>,
    help_description: Option<String>,
    options: IndexMap<String, PluginOption>,
}

impl PluginDescriptor {
    /// A descriptor with no name and no options
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a descriptor.
    ///
    /// Blank help text is stored as absent. Options are deduplicated by
    /// name, keeping the first of each.
    ///
    /// # Errors
    /// Returns an invalid argument error if there are options but the name
    /// is missing or blank
    pub fn new(
        name: Option<String>,
        help_header: Option<String>,
        help_description: Option<String>,
        options: impl IntoIterator<Item = PluginOption>,
    ) -> Result<Self> {
        let mut deduplicated = IndexMap::new();
        for option in options {
            deduplicated.entry(option.name.clone()).or_insert(option);
        }

        let name = non_blank(name);
        if name.is_none() && !deduplicated.is_empty() {
            return Err(SchemaDocError::invalid_argument("No command name provided"));
        }

        Ok(Self {
            name,
            help_header: non_blank(help_header),
            help_description: non_blank(help_description),
            options: deduplicated,
        })
    }

    /// Creates a descriptor with a name and help header but no options.
    pub fn named(name: impl Into<String>, help_header: impl Into<String>) -> Self {
        Self {
            name: non_blank(Some(name.into())),
            help_header: non_blank(Some(help_header.into())),
            ..Self::default()
        }
    }

    /// Builder method to set the help description.
    pub fn with_help_description(mut self, help_description: impl Into<String>) -> Self {
        self.help_description = non_blank(Some(help_description.into()));
        self
    }

    /// Adds an option unless one with the same name already exists.
    ///
    /// # Errors
    /// Returns an invalid argument error if the descriptor has no name
    pub fn add_option(
        mut self,
        name: impl Into<String>,
        help_text: impl Into<String>,
        value_kind: ValueKind,
    ) -> Result<Self> {
        if self.name.is_none() {
            return Err(SchemaDocError::invalid_argument("No command name provided"));
        }

        let option = PluginOption::new(name, help_text, value_kind);
        self.options.entry(option.name.clone()).or_insert(option);
        Ok(self)
    }

    /// Command name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// One-line help shown in command listings
    pub fn help_header(&self) -> Option<&str> {
        self.help_header.as_deref()
    }

    /// Longer help shown for the command itself
    pub fn help_description(&self) -> Option<&str> {
        self.help_description.as_deref()
    }

    /// Looks up an option by name
    pub fn option(&self, name: &str) -> Option<&PluginOption> {
        self.options.get(name)
    }

    /// Options in the order they were first added
    pub fn options(&self) -> impl Iterator<Item = &PluginOption> {
        self.options.values()
    }

    /// Number of distinct options
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// True if the descriptor has neither a name nor options
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.options.is_empty()
    }

    /// Help text listing the command and its options
    pub fn help(&self) -> String {
        let mut help = String::new();
        if let Some(name) = self.name() {
            help.push_str(name);
            if let Some(header) = self.help_header() {
                help.push_str(" - ");
                help.push_str(header);
            }
            help.push('\n');
        }
        if let Some(description) = self.help_description() {
            help.push('\n');
            help.push_str(description);
            help.push('\n');
        }
        if !self.options.is_empty() {
            help.push_str("\nOptions:\n");
            for option in self.options() {
                let flag = format!("--{} <{}>", option.name, option.value_kind);
                help.push_str(&format!("  {:<32}{}\n", flag, option.help_text));
            }
        }
        help
    }
}

impl PartialEq for PluginDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for PluginDescriptor {}

impl Hash for PluginDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.options.keys().map(String::as_str).collect();
        write!(
            f,
            "PluginDescriptor[name='{}', options=[{}]]",
            self.name().unwrap_or_default(),
            names.join(", ")
        )
    }
}

/// Descriptor for the `render` command and its options
pub fn render_command_descriptor() -> PluginDescriptor {
    let options: IndexMap<String, PluginOption> = [
        ("input", "Metadata snapshot to render (JSON)", ValueKind::Path),
        ("format", "Output format: text, html or dot", ValueKind::Text),
        ("output", "Output file; standard output when omitted", ValueKind::Path),
        ("config", "Render options file (JSON)", ValueKind::Path),
        ("title", "Title for the document", ValueKind::Text),
        ("no-header", "Do not write the document start", ValueKind::Flag),
        ("no-footer", "Do not write the document end", ValueKind::Flag),
        ("no-info", "Do not show system information", ValueKind::Flag),
        ("no-tool-info", "Do not show tool information", ValueKind::Flag),
        ("show-database-info", "Show database information", ValueKind::Flag),
        ("show-driver-info", "Show driver information", ValueKind::Flag),
        (
            "info-level",
            "Detail level the snapshot was collected with",
            ValueKind::Text,
        ),
    ]
    .into_iter()
    .map(|(name, help, kind)| (name.to_string(), PluginOption::new(name, help, kind)))
    .collect();

    PluginDescriptor {
        name: Some("render".to_string()),
        help_header: Some("Render a metadata snapshot as a report or diagram".to_string()),
        help_description: Some(
            "Writes database, driver and tool information from a collected \
             snapshot as plain text, HTML, or a Graphviz DOT title block."
                .to_string(),
        ),
        options,
    }
}
