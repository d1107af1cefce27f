//! Driving a formatter through one render pass.

use crate::config::{OutputFormat, RenderOptions};
use crate::diagram::DotFormatter;
use crate::error::Result;
use crate::lifecycle::{Formatter, LifecycleState};
use crate::models::{CrawlInfo, DatabaseInfo, DriverInfo, MetadataSnapshot, ToolInfo};
use crate::sink::OutputSink;
use crate::tabular::TabularFormatter;
use std::io::Write;
use tracing::{debug, info, warn};

/// A report or diagram formatter, chosen by output format
#[derive(Debug)]
pub enum DocumentFormatter<'a, W: Write> {
    Tabular(TabularFormatter<'a, W>),
    Diagram(DotFormatter<'a, W>),
}

impl<'a, W: Write> DocumentFormatter<'a, W> {
    /// Creates the formatter for `format`, writing to `writer`
    pub fn new(format: OutputFormat, options: &'a RenderOptions, writer: W) -> Result<Self> {
        let sink = OutputSink::new(writer, format);
        match format {
            OutputFormat::Text | OutputFormat::Html => {
                Ok(Self::Tabular(TabularFormatter::new(options, sink)?))
            }
            OutputFormat::Dot => Ok(Self::Diagram(DotFormatter::new(options, sink)?)),
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> LifecycleState {
        match self {
            Self::Tabular(formatter) => formatter.state(),
            Self::Diagram(formatter) => formatter.state(),
        }
    }

    /// Releases the sink and returns the underlying writer
    pub fn into_inner(self) -> Result<W> {
        match self {
            Self::Tabular(formatter) => formatter.into_inner(),
            Self::Diagram(formatter) => formatter.into_inner(),
        }
    }

    fn as_formatter(&mut self) -> &mut dyn Formatter {
        match self {
            Self::Tabular(formatter) => formatter,
            Self::Diagram(formatter) => formatter,
        }
    }
}

impl<W: Write> Formatter for DocumentFormatter<'_, W> {
    fn begin(&mut self) -> Result<()> {
        self.as_formatter().begin()
    }

    fn handle_header_start(&mut self) -> Result<()> {
        self.as_formatter().handle_header_start()
    }

    fn handle_header_end(&mut self) -> Result<()> {
        self.as_formatter().handle_header_end()
    }

    fn handle_crawl_info(&mut self, crawl_info: Option<&CrawlInfo>) -> Result<()> {
        self.as_formatter().handle_crawl_info(crawl_info)
    }

    fn handle_database_info(&mut self, database_info: Option<&DatabaseInfo>) -> Result<()> {
        self.as_formatter().handle_database_info(database_info)
    }

    fn handle_driver_info(&mut self, driver_info: Option<&DriverInfo>) -> Result<()> {
        self.as_formatter().handle_driver_info(driver_info)
    }

    fn handle_tool_info(&mut self, tool_info: Option<&ToolInfo>) -> Result<()> {
        self.as_formatter().handle_tool_info(tool_info)
    }

    fn handle_info_start(&mut self) -> Result<()> {
        self.as_formatter().handle_info_start()
    }

    fn handle_info_end(&mut self) -> Result<()> {
        self.as_formatter().handle_info_end()
    }

    fn end(&mut self) -> Result<()> {
        self.as_formatter().end()
    }
}

fn render_body<F: Formatter + ?Sized>(formatter: &mut F, snapshot: &MetadataSnapshot) -> Result<()> {
    formatter.handle_header_start()?;
    formatter.handle_crawl_info(snapshot.crawl_info.as_ref())?;
    formatter.handle_header_end()?;

    formatter.handle_info_start()?;
    formatter.handle_tool_info(snapshot.tool_info.as_ref())?;
    formatter.handle_database_info(snapshot.database_info.as_ref())?;
    formatter.handle_driver_info(snapshot.driver_info.as_ref())?;
    formatter.handle_info_end()
}

/// Runs the full callback sequence over a snapshot.
///
/// `end` runs even when an earlier callback fails, so the document is
/// terminated and the sink released; the first error is returned.
///
/// # Errors
/// Returns the first lifecycle, configuration or sink error encountered
pub fn render<F: Formatter + ?Sized>(formatter: &mut F, snapshot: &MetadataSnapshot) -> Result<()> {
    debug!("Starting render pass");
    let body = formatter
        .begin()
        .and_then(|()| render_body(formatter, snapshot));
    if let Err(e) = &body {
        warn!("Render pass failed, closing document: {}", e);
    }

    let end = formatter.end();
    body.and(end)
}

/// Renders a snapshot into `writer` and hands the writer back.
///
/// # Errors
/// Returns the first error of the render pass
pub fn render_document<W: Write>(
    format: OutputFormat,
    options: &RenderOptions,
    snapshot: &MetadataSnapshot,
    writer: W,
) -> Result<W> {
    info!("Rendering {} document", format);
    let mut formatter = DocumentFormatter::new(format, options, writer)?;
    render(&mut formatter, snapshot)?;
    formatter.into_inner()
}

/// Renders a snapshot to a string.
///
/// # Errors
/// Returns the first error of the render pass
pub fn render_to_string(
    format: OutputFormat,
    options: &RenderOptions,
    snapshot: &MetadataSnapshot,
) -> Result<String> {
    let bytes = render_document(format, options, snapshot, Vec::new())?;
    String::from_utf8(bytes).map_err(|e| {
        crate::error::SchemaDocError::io(
            "Rendered document is not valid UTF-8",
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaDocError;

    /// Records callbacks and fails on a chosen one
    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        fail_on: Option<&'static str>,
    }

    impl Recorder {
        fn record(&mut self, name: &'static str) -> Result<()> {
            self.calls.push(name);
            if self.fail_on == Some(name) {
                return Err(SchemaDocError::io(name, std::io::Error::other("boom")));
            }
            Ok(())
        }
    }

    impl Formatter for Recorder {
        fn begin(&mut self) -> Result<()> {
            self.record("begin")
        }
        fn handle_header_start(&mut self) -> Result<()> {
            self.record("header_start")
        }
        fn handle_header_end(&mut self) -> Result<()> {
            self.record("header_end")
        }
        fn handle_crawl_info(&mut self, _: Option<&CrawlInfo>) -> Result<()> {
            self.record("crawl_info")
        }
        fn handle_database_info(&mut self, _: Option<&DatabaseInfo>) -> Result<()> {
            self.record("database_info")
        }
        fn handle_driver_info(&mut self, _: Option<&DriverInfo>) -> Result<()> {
            self.record("driver_info")
        }
        fn handle_tool_info(&mut self, _: Option<&ToolInfo>) -> Result<()> {
            self.record("tool_info")
        }
        fn handle_info_start(&mut self) -> Result<()> {
            self.record("info_start")
        }
        fn handle_info_end(&mut self) -> Result<()> {
            self.record("info_end")
        }
        fn end(&mut self) -> Result<()> {
            self.record("end")
        }
    }

    #[test]
    fn test_fixed_callback_sequence() {
        let mut recorder = Recorder::default();
        render(&mut recorder, &MetadataSnapshot::default()).unwrap();

        assert_eq!(
            recorder.calls,
            vec![
                "begin",
                "header_start",
                "crawl_info",
                "header_end",
                "info_start",
                "tool_info",
                "database_info",
                "driver_info",
                "info_end",
                "end",
            ]
        );
    }

    #[test]
    fn test_end_runs_after_failure() {
        let mut recorder = Recorder {
            fail_on: Some("database_info"),
            ..Recorder::default()
        };
        let error = render(&mut recorder, &MetadataSnapshot::default()).unwrap_err();

        assert!(error.is_io());
        let calls = recorder.calls;
        assert_eq!(calls.last(), Some(&"end"));
        assert!(!calls.contains(&"driver_info"));
    }

    #[test]
    fn test_end_runs_after_failed_begin() {
        let mut recorder = Recorder {
            fail_on: Some("begin"),
            ..Recorder::default()
        };
        assert!(render(&mut recorder, &MetadataSnapshot::default()).is_err());
        assert_eq!(recorder.calls, vec!["begin", "end"]);
    }

    #[test]
    fn test_document_formatter_selects_variant() {
        let options = RenderOptions::new();
        assert!(matches!(
            DocumentFormatter::new(OutputFormat::Html, &options, Vec::new()).unwrap(),
            DocumentFormatter::Tabular(_)
        ));
        assert!(matches!(
            DocumentFormatter::new(OutputFormat::Dot, &options, Vec::new()).unwrap(),
            DocumentFormatter::Diagram(_)
        ));
    }

    #[test]
    fn test_render_closes_formatter() {
        let options = RenderOptions::new();
        let mut formatter = DocumentFormatter::new(OutputFormat::Text, &options, Vec::new()).unwrap();
        render(&mut formatter, &MetadataSnapshot::default()).unwrap();
        assert_eq!(formatter.state(), LifecycleState::Closed);
        assert!(render(&mut formatter, &MetadataSnapshot::default()).is_err());
    }

    #[test]
    fn test_render_to_string_dot_is_balanced() {
        let output =
            render_to_string(OutputFormat::Dot, &RenderOptions::new(), &MetadataSnapshot::default())
                .unwrap();
        assert_eq!(output.matches('{').count(), output.matches('}').count());
        assert!(output.trim_end().ends_with('}'));
    }
}
