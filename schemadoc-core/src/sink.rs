//! Output sink for rendered documents.
//!
//! The sink is the only place rendered text leaves a formatter. It buffers
//! writes, knows how text must be escaped for its [`OutputFormat`], and is
//! released on every exit path: [`OutputSink::close`] flushes and reports
//! errors, and dropping an unclosed sink still flushes whatever is buffered.

use crate::config::OutputFormat;
use crate::error::{Result, SchemaDocError};
use crate::markup::escape_html;
use std::borrow::Cow;
use std::io::{self, BufWriter, Write};

/// Buffered, format-aware writer for one render pass
#[derive(Debug)]
pub struct OutputSink<W: Write> {
    writer: BufWriter<W>,
    format: OutputFormat,
    closed: bool,
}

impl<W: Write> OutputSink<W> {
    /// Wraps a writer for the given format
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer: BufWriter::new(writer),
            format,
            closed: false,
        }
    }

    /// Format this sink escapes for
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// True once [`close`](Self::close) has succeeded
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Escapes text for this sink's format
    pub fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.format.is_markup() {
            escape_html(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Appends text verbatim
    pub fn append(&mut self, text: &str) -> Result<&mut Self> {
        self.ensure_open()?;
        self.writer
            .write_all(text.as_bytes())
            .map_err(|e| SchemaDocError::io("Failed to write to output sink", e))?;
        Ok(self)
    }

    /// Appends text escaped for this sink's format
    pub fn append_escaped(&mut self, text: &str) -> Result<&mut Self> {
        let escaped = self.escape(text).into_owned();
        self.append(&escaped)
    }

    /// Ends the current line
    pub fn println(&mut self) -> Result<&mut Self> {
        self.append("\n")
    }

    /// Appends text verbatim followed by a line break
    pub fn append_line(&mut self, text: &str) -> Result<()> {
        self.append(text)?.println()?;
        Ok(())
    }

    /// Pushes buffered text to the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| SchemaDocError::io("Failed to flush output sink", e))
    }

    /// Flushes and marks the sink closed; closing twice is a no-op
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.flush()
    }

    /// Underlying writer; text still buffered is not visible through it
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Closes the sink and returns the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.close()?;
        self.writer
            .into_inner()
            .map_err(|e| SchemaDocError::io("Failed to release output sink", e.into_error()))
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(SchemaDocError::io(
                "Output sink is closed",
                io::Error::from(io::ErrorKind::BrokenPipe),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that accepts a fixed number of bytes and then fails
    struct FailingWriter {
        remaining: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::other("device full"));
            }
            let written = buf.len().min(self.remaining);
            self.remaining -= written;
            Ok(written)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_append_and_into_inner() {
        let mut sink = OutputSink::new(Vec::new(), OutputFormat::Text);
        sink.append("a<b").unwrap().println().unwrap();
        sink.append_line("done").unwrap();

        let bytes = sink.into_inner().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a<b\ndone\n");
    }

    #[test]
    fn test_escaping_follows_format() {
        let text = OutputSink::new(Vec::new(), OutputFormat::Text);
        let html = OutputSink::new(Vec::new(), OutputFormat::Html);
        let dot = OutputSink::new(Vec::new(), OutputFormat::Dot);

        assert_eq!(text.escape("a & b"), "a & b");
        assert_eq!(html.escape("a & b"), "a &amp; b");
        assert_eq!(dot.escape("<x>"), "&lt;x&gt;");
    }

    #[test]
    fn test_append_escaped() {
        let mut sink = OutputSink::new(Vec::new(), OutputFormat::Html);
        sink.append_escaped("<td>").unwrap();
        assert_eq!(sink.into_inner().unwrap(), b"&lt;td&gt;");
    }

    #[test]
    fn test_write_after_close_fails() {
        let mut sink = OutputSink::new(Vec::new(), OutputFormat::Text);
        sink.close().unwrap();
        sink.close().unwrap();
        assert!(sink.is_closed());
        assert!(sink.append("late").unwrap_err().is_io());
    }

    #[test]
    fn test_flush_error_is_reported_as_io() {
        let mut sink = OutputSink::new(FailingWriter { remaining: 4 }, OutputFormat::Text);
        sink.append("more than four bytes").unwrap();
        let error = sink.close().unwrap_err();
        assert!(error.is_io());
    }

    #[test]
    fn test_drop_flushes_buffered_text() {
        let mut target = Vec::new();
        {
            let mut sink = OutputSink::new(&mut target, OutputFormat::Text);
            sink.append("buffered").unwrap();
        }
        assert_eq!(target, b"buffered");
    }
}
