//! Core rendering library for SchemaDoc.
//!
//! This crate turns a collected database metadata snapshot (crawl summary,
//! database server details, driver details, and tool details) into a
//! document: a plain-text or HTML report, or the title block of a Graphviz
//! DOT diagram.
//!
//! # Rendering Guarantees
//! - Every formatter is driven through one fixed callback sequence
//! - Output is well-formed for any combination of suppressed sections
//! - A missing record writes nothing and is never an error
//! - Connection URLs are written with credentials redacted
//!
//! # Architecture
//! The library follows these patterns:
//! - A [`Formatter`] trait implemented by each document kind
//! - An explicit lifecycle state machine guarding callback order
//! - An [`OutputSink`] owning the destination and releasing it on `end`

pub mod color;
pub mod config;
pub mod diagram;
pub mod error;
pub mod formatting;
pub mod info_level;
pub mod lifecycle;
pub mod logging;
pub mod markup;
pub mod models;
pub mod plugin;
pub mod render;
pub mod sink;
pub mod tabular;

// Re-export commonly used types
pub use color::Color;
pub use config::{GraphvizAttributes, OutputFormat, RenderOptions, default_graphviz_attributes};
pub use diagram::DotFormatter;
pub use error::{Result, SchemaDocError, redact_database_url};
pub use info_level::InfoLevel;
pub use lifecycle::{Formatter, LifecycleState};
pub use logging::init_logging;
pub use models::{
    CrawlInfo, DatabaseInfo, DatabaseProperty, DriverInfo, DriverProperty, MetadataSnapshot,
    ProductVersion, Property, ToolInfo,
};
pub use plugin::{PluginDescriptor, PluginOption, ValueKind, render_command_descriptor};
pub use render::{DocumentFormatter, render, render_document, render_to_string};
pub use sink::OutputSink;
pub use tabular::TabularFormatter;
