//! Name-value reports in plain text or HTML.
//!
//! The report is a flat sequence of headings and name-value tables. There
//! is no wrapping container, so the header and info regions need no
//! brackets of their own; only the document start and end markers have to
//! be balanced, and each is controlled by its own flag.

use crate::config::{OutputFormat, RenderOptions};
use crate::error::{Result, SchemaDocError, redact_database_url};
use crate::formatting::{DocumentHeaderType, FormattingHelper};
use crate::lifecycle::{Formatter, LifecycleState};
use crate::markup::Alignment;
use crate::models::{CrawlInfo, DatabaseInfo, DriverInfo, DriverProperty, ToolInfo};
use crate::sink::OutputSink;
use std::io::Write;

/// Heading written for the crawl summary and for the info region
pub const SYSTEM_INFORMATION: &str = "System Information";

/// Heading of the tool section, fixed regardless of the tool name
pub const TOOL_INFORMATION: &str = "SchemaCrawler Information";

/// Formatter for plain text and HTML reports
#[derive(Debug)]
pub struct TabularFormatter<'a, W: Write> {
    options: &'a RenderOptions,
    helper: FormattingHelper<W>,
    state: LifecycleState,
}

impl<'a, W: Write> TabularFormatter<'a, W> {
    /// Binds a formatter to its options and sink.
    ///
    /// # Errors
    /// Returns a configuration error if the sink is not a report format
    pub fn new(options: &'a RenderOptions, sink: OutputSink<W>) -> Result<Self> {
        if !sink.format().is_tabular() {
            return Err(SchemaDocError::configuration(format!(
                "Tabular reports cannot be written as {}",
                sink.format()
            )));
        }

        Ok(Self {
            options,
            helper: FormattingHelper::new(sink),
            state: LifecycleState::Idle,
        })
    }

    /// Creates a formatter writing `format` to `writer`.
    ///
    /// # Errors
    /// Returns a configuration error if `format` is not a report format
    pub fn for_writer(options: &'a RenderOptions, writer: W, format: OutputFormat) -> Result<Self> {
        Self::new(options, OutputSink::new(writer, format))
    }

    /// Current lifecycle state
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// The output sink
    pub const fn sink(&self) -> &OutputSink<W> {
        self.helper.sink()
    }

    /// Flushes buffered output to the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.helper.sink_mut().flush()
    }

    /// Releases the sink and returns the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.helper.into_sink().into_inner()
    }

    fn write_driver_property(&mut self, property: &DriverProperty) -> Result<()> {
        self.helper.write_name_row(&property.name, "[driver property]")?;
        self.helper.write_description_row(&property.description)?;
        self.helper.write_description_row(&property.details())?;
        self.helper
            .write_detail_row("", "value", property.value.as_deref().unwrap_or_default())
    }
}

/// Connection URL as shown in reports, with any password masked
fn display_url(url: &str) -> String {
    if url.trim().is_empty() {
        String::new()
    } else {
        redact_database_url(url)
    }
}

impl<W: Write> Formatter for TabularFormatter<'_, W> {
    fn begin(&mut self) -> Result<()> {
        self.state.begin()?;
        if !self.options.no_header {
            self.helper.write_document_start()?;
        }
        Ok(())
    }

    fn handle_header_start(&mut self) -> Result<()> {
        self.state.require_open("handle_header_start")
    }

    fn handle_header_end(&mut self) -> Result<()> {
        self.state.require_open("handle_header_end")
    }

    fn handle_crawl_info(&mut self, crawl_info: Option<&CrawlInfo>) -> Result<()> {
        self.state.require_open("handle_crawl_info")?;
        let Some(crawl_info) = crawl_info else {
            return Ok(());
        };

        if let Some(title) = self.options.title() {
            self.helper.write_header(DocumentHeaderType::Title, title)?;
        }

        if self.options.no_info {
            return Ok(());
        }

        self.helper
            .write_header(DocumentHeaderType::SubTitle, SYSTEM_INFORMATION)?;
        self.helper.write_object_start()?;

        if !self.options.no_tool_info {
            self.helper.write_name_value_row(
                "generated by",
                &crawl_info.tool_version.to_string(),
                Alignment::Inherit,
            )?;
            self.helper.write_name_value_row(
                "generated on",
                &crawl_info.crawl_timestamp,
                Alignment::Inherit,
            )?;
        }

        if self.options.show_database_info {
            self.helper.write_name_value_row(
                "database version",
                &crawl_info.database_version.to_string(),
                Alignment::Inherit,
            )?;
        }

        if self.options.show_driver_info {
            self.helper.write_name_value_row(
                "driver version",
                &crawl_info.driver_version.to_string(),
                Alignment::Inherit,
            )?;
        }

        self.helper.write_object_end()
    }

    fn handle_database_info(&mut self, database_info: Option<&DatabaseInfo>) -> Result<()> {
        self.state.require_open("handle_database_info")?;
        let Some(database_info) = database_info else {
            return Ok(());
        };
        if !self.options.verbose_database_info || !self.options.show_database_info {
            return Ok(());
        }

        if !database_info.server_info.is_empty() {
            self.helper
                .write_header(DocumentHeaderType::Section, "Database Server Information")?;
            self.helper.write_object_start()?;
            for property in &database_info.server_info {
                self.helper.write_name_value_row(
                    &property.name,
                    &property.value_text(),
                    Alignment::Inherit,
                )?;
            }
            self.helper.write_object_end()?;
        }

        self.helper
            .write_header(DocumentHeaderType::Section, "Database Information")?;
        self.helper.write_object_start()?;
        self.helper.write_name_value_row(
            "database product name",
            &database_info.product_name,
            Alignment::Inherit,
        )?;
        self.helper.write_name_value_row(
            "database product version",
            &database_info.product_version,
            Alignment::Inherit,
        )?;
        self.helper.write_name_value_row(
            "database user name",
            &database_info.user_name,
            Alignment::Inherit,
        )?;
        self.helper.write_object_end()?;

        if !database_info.properties.is_empty() {
            self.helper
                .write_header(DocumentHeaderType::Section, "Database Characteristics")?;
            self.helper.write_object_start()?;
            for property in &database_info.properties {
                self.helper.write_name_value_row(
                    &property.description,
                    &property.value_text(),
                    Alignment::Inherit,
                )?;
            }
            self.helper.write_object_end()?;
        }

        Ok(())
    }

    fn handle_driver_info(&mut self, driver_info: Option<&DriverInfo>) -> Result<()> {
        self.state.require_open("handle_driver_info")?;
        let Some(driver_info) = driver_info else {
            return Ok(());
        };
        if !self.options.verbose_database_info || !self.options.show_driver_info {
            return Ok(());
        }

        self.helper
            .write_header(DocumentHeaderType::Section, "JDBC Driver Information")?;
        self.helper.write_object_start()?;
        self.helper.write_name_value_row(
            "driver name",
            &driver_info.product_name,
            Alignment::Inherit,
        )?;
        self.helper.write_name_value_row(
            "driver version",
            &driver_info.product_version,
            Alignment::Inherit,
        )?;
        self.helper.write_name_value_row(
            "driver class name",
            &driver_info.driver_class_name,
            Alignment::Inherit,
        )?;
        self.helper.write_name_value_row(
            "url",
            &display_url(&driver_info.connection_url),
            Alignment::Inherit,
        )?;
        self.helper.write_name_value_row(
            "is JDBC compliant",
            if driver_info.jdbc_compliant {
                "true"
            } else {
                "false"
            },
            Alignment::Inherit,
        )?;
        self.helper.write_object_end()?;

        if !driver_info.driver_properties.is_empty() {
            self.helper
                .write_header(DocumentHeaderType::Section, "JDBC Driver Properties")?;
            for property in &driver_info.driver_properties {
                self.helper.write_object_start()?;
                self.write_driver_property(property)?;
                self.helper.write_object_end()?;
            }
        }

        Ok(())
    }

    fn handle_tool_info(&mut self, tool_info: Option<&ToolInfo>) -> Result<()> {
        self.state.require_open("handle_tool_info")?;
        let Some(tool_info) = tool_info else {
            return Ok(());
        };
        if !self.options.verbose_database_info || self.options.no_tool_info {
            return Ok(());
        }

        self.helper
            .write_header(DocumentHeaderType::Section, TOOL_INFORMATION)?;
        self.helper.write_object_start()?;
        self.helper.write_name_value_row(
            "product name",
            &tool_info.product_name,
            Alignment::Inherit,
        )?;
        self.helper.write_name_value_row(
            "product version",
            &tool_info.product_version,
            Alignment::Inherit,
        )?;
        self.helper.write_object_end()
    }

    fn handle_info_start(&mut self) -> Result<()> {
        self.state.require_open("handle_info_start")?;
        if !self.options.verbose_database_info || self.options.no_info {
            return Ok(());
        }

        // Repeats the heading handle_crawl_info already wrote when both run.
        // Reports have always carried both, so it stays until product
        // decides the second one is a defect.
        self.helper
            .write_header(DocumentHeaderType::SubTitle, SYSTEM_INFORMATION)
    }

    fn handle_info_end(&mut self) -> Result<()> {
        self.state.require_open("handle_info_end")
    }

    fn end(&mut self) -> Result<()> {
        self.state.end()?;
        let footer = if self.options.no_footer {
            Ok(())
        } else {
            self.helper.write_document_end()
        };
        let released = self.helper.sink_mut().close();
        footer.and(released)
    }
}
