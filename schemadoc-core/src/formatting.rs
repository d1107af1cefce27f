//! Row and heading primitives for tabular reports.
//!
//! The tabular formatter only ever speaks in documents, headings, objects
//! (name-value tables) and rows. This helper turns those into plain text or
//! HTML depending on the sink's format, so the formatter itself stays
//! format-agnostic.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::markup::{Alignment, Tag, table_cell, table_row};
use crate::sink::OutputSink;
use std::io::Write;

/// Width of the name column in plain text rows
const TEXT_NAME_WIDTH: usize = 34;

const HTML_DOCUMENT_START: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <title>schemadoc report</title>
  <style>
    body { font-family: Helvetica, Arial, sans-serif; font-size: 0.9em; }
    table { border-collapse: collapse; }
    td { padding: 0.1em 0.6em; vertical-align: top; }
    td.name { font-weight: bold; }
    td.definition { color: #555555; font-style: italic; }
  </style>
</head>
<body>"#;

const HTML_DOCUMENT_END: &str = "</body>\n</html>";

/// Level of a heading in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentHeaderType {
    Title,
    SubTitle,
    Section,
}

impl DocumentHeaderType {
    const fn html_tag(self) -> &'static str {
        match self {
            Self::Title => "h1",
            Self::SubTitle => "h2",
            Self::Section => "h3",
        }
    }

    const fn text_underline(self) -> char {
        match self {
            Self::Title | Self::SubTitle => '=',
            Self::Section => '-',
        }
    }
}

/// Writes report structure to an [`OutputSink`]
#[derive(Debug)]
pub struct FormattingHelper<W: Write> {
    sink: OutputSink<W>,
}

impl<W: Write> FormattingHelper<W> {
    /// Wraps a sink
    pub const fn new(sink: OutputSink<W>) -> Self {
        Self { sink }
    }

    /// The wrapped sink
    pub const fn sink(&self) -> &OutputSink<W> {
        &self.sink
    }

    /// The wrapped sink, mutably
    pub const fn sink_mut(&mut self) -> &mut OutputSink<W> {
        &mut self.sink
    }

    /// Unwraps the sink
    pub fn into_sink(self) -> OutputSink<W> {
        self.sink
    }

    const fn is_html(&self) -> bool {
        !matches!(self.sink.format(), OutputFormat::Text)
    }

    /// Writes the document preamble; plain text has none
    pub fn write_document_start(&mut self) -> Result<()> {
        if self.is_html() {
            self.sink.append_line(HTML_DOCUMENT_START)?;
        }
        Ok(())
    }

    /// Writes the document closing; plain text has none
    pub fn write_document_end(&mut self) -> Result<()> {
        if self.is_html() {
            self.sink.append_line(HTML_DOCUMENT_END)?;
        }
        Ok(())
    }

    /// Writes a heading
    pub fn write_header(&mut self, header_type: DocumentHeaderType, text: &str) -> Result<()> {
        if self.is_html() {
            let heading = Tag::new(header_type.html_tag()).with_escaped_text(text);
            return self.sink.append_line(&heading.render());
        }

        if header_type != DocumentHeaderType::Title {
            self.sink.println()?.println()?;
        }
        let underline: String = std::iter::repeat_n(
            header_type.text_underline(),
            text.chars().count(),
        )
        .collect();
        self.sink.append_line(text)?;
        self.sink.append_line(&underline)
    }

    /// Opens a name-value table
    pub fn write_object_start(&mut self) -> Result<()> {
        if self.is_html() {
            return self.sink.append_line("<table>");
        }
        self.sink.println()?;
        Ok(())
    }

    /// Closes a name-value table
    pub fn write_object_end(&mut self) -> Result<()> {
        if self.is_html() {
            self.sink.append_line("</table>")?;
            self.sink.append_line("<p>&#160;</p>")?;
        }
        Ok(())
    }

    /// Writes a row with a name and a value
    pub fn write_name_value_row(
        &mut self,
        name: &str,
        value: &str,
        alignment: Alignment,
    ) -> Result<()> {
        if self.is_html() {
            let row = table_row()
                .with_inner_tag(table_cell().with_class("name").with_escaped_text(name))
                .with_inner_tag(
                    table_cell()
                        .with_alignment(alignment)
                        .with_escaped_text(value),
                );
            return self.sink.append_line(&row.render());
        }

        let line = format!("{:<width$}{}", name, value, width = TEXT_NAME_WIDTH);
        self.sink.append_line(line.trim_end())
    }

    /// Writes a row naming an item, with a short right-hand description
    pub fn write_name_row(&mut self, name: &str, description: &str) -> Result<()> {
        if self.is_html() {
            let row = table_row()
                .with_inner_tag(
                    table_cell()
                        .with_class("name")
                        .with_emphasis(true)
                        .with_escaped_text(name),
                )
                .with_inner_tag(
                    table_cell()
                        .with_alignment(Alignment::Right)
                        .with_escaped_text(description),
                );
            return self.sink.append_line(&row.render());
        }

        let line = format!("{:<width$}{}", name, description, width = TEXT_NAME_WIDTH);
        self.sink.append_line(line.trim_end())
    }

    /// Writes a free-text row spanning the table
    pub fn write_description_row(&mut self, description: &str) -> Result<()> {
        if self.is_html() {
            let row = table_row().with_inner_tag(
                table_cell()
                    .with_class("definition")
                    .with_column_span(2)
                    .with_escaped_text(description),
            );
            return self.sink.append_line(&row.render());
        }

        let line = format!("  {}", description);
        self.sink.append_line(line.trim_end())
    }

    /// Writes an indented detail row under the current item
    pub fn write_detail_row(&mut self, ordinal: &str, subname: &str, value: &str) -> Result<()> {
        let label = format!("{}{}", ordinal, subname);
        if self.is_html() {
            let row = table_row()
                .with_inner_tag(table_cell().with_class("spacer").with_escaped_text(&label))
                .with_inner_tag(table_cell().with_escaped_text(value));
            return self.sink.append_line(&row.render());
        }

        let line = format!(
            "  {:<width$}{}",
            label,
            value,
            width = TEXT_NAME_WIDTH.saturating_sub(2)
        );
        self.sink.append_line(line.trim_end())
    }
}
