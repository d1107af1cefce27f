//! Graphviz DOT output.
//!
//! A diagram opens with a header built from the `graph.*`, `node.*` and
//! `edge.*` attributes, followed by an optional title block: a graph label
//! holding a single HTML-like table. The table's opening and closing markup
//! are written by `handle_header_start` and `handle_header_end` under the
//! same condition, so the label is balanced whatever the options say.
//! Database, driver and tool details never appear in diagrams.

use crate::config::{GraphvizAttributes, OutputFormat, RenderOptions};
use crate::error::{Result, SchemaDocError};
use crate::lifecycle::{Formatter, LifecycleState};
use crate::markup::{Alignment, Tag, table_cell, table_row};
use crate::models::{CrawlInfo, DatabaseInfo, DriverInfo, ToolInfo};
use crate::sink::OutputSink;
use std::io::Write;

/// Name of the bundled header template
pub const DOT_HEADER_RESOURCE: &str = "/dot.header.txt";

/// Header template with one `%s` slot each for graph, node and edge attributes
const DOT_HEADER_TEMPLATE: &str = include_str!("../resources/dot.header.txt");

/// Attribute prefixes, in the order their blocks fill the template
const ATTRIBUTE_PREFIXES: [&str; 3] = ["graph", "node", "edge"];

/// Renders the attribute lines for one prefix.
///
/// Only keys of the exact form `prefix.attribute` contribute; anything else
/// is skipped so unrelated settings can share the map.
pub fn graphviz_attribute_block(attributes: &GraphvizAttributes, prefix: &str) -> String {
    let mut block = String::new();
    for (key, value) in attributes {
        let Some((key_prefix, attribute)) = key.split_once('.') else {
            continue;
        };
        if key_prefix != prefix || attribute.is_empty() || attribute.contains('.') {
            continue;
        }
        block.push_str(&format!(
            "    {}=\"{}\"\n",
            attribute,
            value.replace('"', "\\\"")
        ));
    }
    block
}

/// Fills each `%s` slot of a template with the next block, in order.
///
/// # Errors
/// Returns a configuration error if the slot count differs from the number
/// of blocks
pub fn fill_template(template: &str, blocks: &[&str]) -> Result<String> {
    let parts: Vec<&str> = template.split("%s").collect();
    if parts.len() != blocks.len().saturating_add(1) {
        return Err(SchemaDocError::configuration(format!(
            "Template {} has {} insertion points, expected {}",
            DOT_HEADER_RESOURCE,
            parts.len().saturating_sub(1),
            blocks.len()
        )));
    }

    let mut filled = String::with_capacity(template.len());
    for (index, part) in parts.iter().enumerate() {
        filled.push_str(part);
        if let Some(block) = blocks.get(index) {
            filled.push_str(block);
        }
    }
    Ok(filled)
}

/// Builds the diagram header from the bundled template.
///
/// # Errors
/// Returns a configuration error if the template is malformed
pub fn graphviz_header(attributes: &GraphvizAttributes) -> Result<String> {
    let [graph, node, edge] =
        ATTRIBUTE_PREFIXES.map(|prefix| graphviz_attribute_block(attributes, prefix));

    let skipped = attributes
        .keys()
        .filter(|key| {
            !ATTRIBUTE_PREFIXES
                .iter()
                .any(|prefix| key.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('.')))
        })
        .count();
    if skipped > 0 {
        tracing::debug!("Skipped {} graphviz attributes without a known prefix", skipped);
    }

    fill_template(
        DOT_HEADER_TEMPLATE,
        &[graph.as_str(), node.as_str(), edge.as_str()],
    )
}

/// Formatter for Graphviz DOT diagrams
#[derive(Debug)]
pub struct DotFormatter<'a, W: Write> {
    options: &'a RenderOptions,
    sink: OutputSink<W>,
    state: LifecycleState,
}

impl<'a, W: Write> DotFormatter<'a, W> {
    /// Binds a formatter to its options and sink.
    ///
    /// # Errors
    /// Returns a configuration error if the sink is not a DOT sink
    pub fn new(options: &'a RenderOptions, sink: OutputSink<W>) -> Result<Self> {
        if sink.format() != OutputFormat::Dot {
            return Err(SchemaDocError::configuration(format!(
                "Diagrams cannot be written as {}",
                sink.format()
            )));
        }

        Ok(Self {
            options,
            sink,
            state: LifecycleState::Idle,
        })
    }

    /// Creates a formatter writing DOT to `writer`
    pub fn for_writer(options: &'a RenderOptions, writer: W) -> Self {
        Self {
            options,
            sink: OutputSink::new(writer, OutputFormat::Dot),
            state: LifecycleState::Idle,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// The output sink
    pub const fn sink(&self) -> &OutputSink<W> {
        &self.sink
    }

    /// Flushes buffered output to the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    /// Releases the sink and returns the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.sink.into_inner()
    }

    fn write_row(&mut self, row: &Tag) -> Result<()> {
        self.sink.append_line(&row.render())
    }

    fn write_name_value_row(&mut self, name: &str, value: &str) -> Result<()> {
        let row = table_row()
            .with_inner_tag(
                table_cell()
                    .with_escaped_text(name)
                    .with_alignment(Alignment::Right),
            )
            .with_inner_tag(
                table_cell()
                    .with_escaped_text(value)
                    .with_alignment(Alignment::Left),
            );
        self.write_row(&row)
    }
}

impl<W: Write> Formatter for DotFormatter<'_, W> {
    fn begin(&mut self) -> Result<()> {
        self.state.begin()?;
        let header = graphviz_header(&self.options.graphviz_attributes)?;
        self.sink.append_line(&header)
    }

    fn handle_header_start(&mut self) -> Result<()> {
        self.state.require_open("handle_header_start")?;
        if !self.options.has_title_block() {
            return Ok(());
        }

        self.sink
            .append_line("  /* Title Block -=-=-=-=-=-=-=-=-=-=-=-=-=- */")?;
        self.sink.append_line("  graph [ ")?;
        self.sink.append_line("    label=<")?;
        self.sink.append_line(&format!(
            "      <table border=\"1\" cellborder=\"0\" cellspacing=\"0\" color=\"{}\">",
            self.options.label_color
        ))
    }

    fn handle_header_end(&mut self) -> Result<()> {
        self.state.require_open("handle_header_end")?;
        if !self.options.has_title_block() {
            return Ok(());
        }

        self.sink.append_line("      </table>")?;
        self.sink.append_line("    >")?;
        self.sink.append_line("  ];")?;
        self.sink.println()?;
        Ok(())
    }

    fn handle_crawl_info(&mut self, crawl_info: Option<&CrawlInfo>) -> Result<()> {
        self.state.require_open("handle_crawl_info")?;
        let Some(crawl_info) = crawl_info else {
            return Ok(());
        };

        if let Some(title) = self.options.title() {
            let row = table_row().with_inner_tag(
                table_cell()
                    .with_escaped_text(title)
                    .with_alignment(Alignment::Left)
                    .with_emphasis(true)
                    .with_column_span(2),
            );
            self.write_row(&row)?;
        }

        if self.options.no_info {
            return Ok(());
        }

        if !self.options.no_tool_info {
            self.write_name_value_row("generated by", &crawl_info.tool_version.to_string())?;
            self.write_name_value_row("generated on", &crawl_info.crawl_timestamp)?;
        }

        if self.options.show_database_info {
            self.write_name_value_row(
                "database version",
                &crawl_info.database_version.to_string(),
            )?;
        }

        Ok(())
    }

    fn handle_database_info(&mut self, _database_info: Option<&DatabaseInfo>) -> Result<()> {
        self.state.require_open("handle_database_info")
    }

    fn handle_driver_info(&mut self, _driver_info: Option<&DriverInfo>) -> Result<()> {
        self.state.require_open("handle_driver_info")
    }

    fn handle_tool_info(&mut self, _tool_info: Option<&ToolInfo>) -> Result<()> {
        self.state.require_open("handle_tool_info")
    }

    fn handle_info_start(&mut self) -> Result<()> {
        self.state.require_open("handle_info_start")
    }

    fn handle_info_end(&mut self) -> Result<()> {
        self.state.require_open("handle_info_end")
    }

    fn end(&mut self) -> Result<()> {
        self.state.end()?;
        let closing = self.sink.append_line("}");
        let released = self.sink.close();
        closing.and(released)
    }
}
