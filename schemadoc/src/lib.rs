//! Command-line front end for SchemaDoc.
//!
//! Reads a metadata snapshot collected earlier, renders it as a plain-text
//! report, an HTML report, or a Graphviz DOT title block, and writes the
//! result to standard output or to a file. File output is written to a
//! temporary file in the destination directory and moved into place only
//! after the whole document rendered, so a failed run never leaves a
//! truncated document behind.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use schemadoc_core::{
    InfoLevel, MetadataSnapshot, OutputFormat, RenderOptions, render_command_descriptor,
    render_document,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "schemadoc")]
#[command(about = "Database metadata report and diagram renderer")]
#[command(version)]
#[command(long_about = "
SchemaDoc - Database metadata report and diagram renderer

Renders a collected metadata snapshot (crawl summary, database server,
driver and tool details) as a report or as the title block of a diagram.

OUTPUT FORMATS:
- text  Plain-text name-value report
- html  Self-contained HTML report
- dot   Graphviz DOT diagram header and title block

EXAMPLES:
  schemadoc render --input snapshot.json
  schemadoc render --input snapshot.json --format html --output report.html
  schemadoc render --input snapshot.json --format dot --title Inventory
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a metadata snapshot
    Render(RenderArgs),
    /// Describe the render command and its options
    Options,
}

/// Output formats accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Plain-text report
    #[default]
    Text,
    /// HTML report
    Html,
    /// Graphviz DOT diagram
    Dot,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => Self::Text,
            FormatArg::Html => Self::Html,
            FormatArg::Dot => Self::Dot,
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Snapshot file
    #[arg(short, long, help = "Metadata snapshot to render (JSON)")]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Output file path
    #[arg(short, long, help = "Output file; standard output when omitted")]
    pub output: Option<PathBuf>,

    /// Render options file
    #[arg(short, long, help = "Render options file (JSON)")]
    pub config: Option<PathBuf>,

    /// Document title
    #[arg(long, help = "Title for the document")]
    pub title: Option<String>,

    #[arg(long, help = "Do not write the document start")]
    pub no_header: bool,

    #[arg(long, help = "Do not write the document end")]
    pub no_footer: bool,

    #[arg(long, help = "Do not show system information")]
    pub no_info: bool,

    #[arg(long, help = "Do not show tool information")]
    pub no_tool_info: bool,

    #[arg(long, help = "Show database information")]
    pub show_database_info: bool,

    #[arg(long, help = "Show driver information")]
    pub show_driver_info: bool,

    /// Detail level the snapshot was collected with
    #[arg(
        long,
        help = "Detail level the snapshot was collected with (minimum, standard, detailed, maximum)"
    )]
    pub info_level: Option<String>,
}

impl RenderArgs {
    /// Builds render options from the config file, if any, then applies
    /// command-line overrides. Flags only ever switch a setting on.
    ///
    /// # Errors
    /// Returns error if the config file cannot be read or parsed, or the
    /// resulting options are invalid
    pub fn render_options(&self) -> Result<RenderOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                RenderOptions::from_json(&json)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => RenderOptions::new(),
        };

        if let Some(title) = &self.title {
            options = options.with_title(title.clone());
        }
        options.no_header |= self.no_header;
        options.no_footer |= self.no_footer;
        options.no_info |= self.no_info;
        options.no_tool_info |= self.no_tool_info;
        options.show_database_info |= self.show_database_info;
        options.show_driver_info |= self.show_driver_info;
        if let Some(name) = &self.info_level {
            options = options.with_info_level(InfoLevel::from_name(name));
        }

        options.validate()?;
        Ok(options)
    }
}

/// Runs the parsed command.
///
/// # Errors
/// Returns error if the command fails
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Render(args) => render_snapshot(args),
        Command::Options => {
            let help = render_command_descriptor().help();
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(help.as_bytes())
                .context("Failed to write to standard output")?;
            Ok(())
        }
    }
}

/// Reads a snapshot file
///
/// # Errors
/// Returns error if the file cannot be read or is not a snapshot
pub fn load_snapshot(path: &Path) -> Result<MetadataSnapshot> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = MetadataSnapshot::from_json(&json)
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;
    if snapshot.is_empty() {
        warn!("Snapshot {} contains no metadata records", path.display());
    }
    Ok(snapshot)
}

fn render_snapshot(args: &RenderArgs) -> Result<()> {
    let options = args.render_options()?;
    let snapshot = load_snapshot(&args.input)?;
    let format = OutputFormat::from(args.format);

    info!("Input: {}", args.input.display());
    match &args.output {
        Some(path) => {
            info!("Output: {}", path.display());
            write_atomically(path, |file| {
                render_document(format, &options, &snapshot, file)?;
                Ok(())
            })?;
            info!("✓ Wrote {} document to {}", format, path.display());
        }
        None => {
            let stdout = std::io::stdout().lock();
            render_document(format, &options, &snapshot, stdout)?;
        }
    }
    Ok(())
}

/// Writes a file through a temporary sibling that replaces `path` only when
/// `write` succeeds.
///
/// # Errors
/// Returns error if the temporary file cannot be created, `write` fails, or
/// the file cannot be moved into place
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut std::fs::File) -> Result<()>,
{
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temporary = tempfile::NamedTempFile::new_in(directory)
        .with_context(|| format!("Failed to create temporary file in {}", directory.display()))?;
    debug!("Writing to temporary file {}", temporary.path().display());

    write(temporary.as_file_mut())?;
    temporary
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
