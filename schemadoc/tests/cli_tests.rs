//! Command-line tests against temporary files.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use clap::{CommandFactory, Parser};
use schemadoc::{Cli, Command, FormatArg, run, write_atomically};
use std::fs;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "crawl_info": {
    "tool_version": { "product_name": "schemadoc", "product_version": "0.1.0" },
    "crawl_timestamp": "2024-01-02 03:04:05",
    "database_version": { "product_name": "H2", "product_version": "2.1" },
    "driver_version": { "product_name": "H2 JDBC Driver", "product_version": "2.1.214" }
  },
  "database_info": {
    "product_name": "H2",
    "product_version": "2.1",
    "user_name": "SA"
  },
  "driver_info": {
    "product_name": "H2 JDBC Driver",
    "product_version": "2.1.214",
    "driver_class_name": "org.h2.Driver",
    "connection_url": "jdbc:h2:mem:inventory",
    "jdbc_compliant": true
  },
  "tool_info": { "product_name": "schemadoc", "product_version": "0.1.0" }
}"#;

fn write_snapshot(dir: &TempDir) -> String {
    let path = dir.path().join("snapshot.json");
    fs::write(&path, SNAPSHOT).unwrap();
    path.display().to_string()
}

fn run_args(args: &[&str]) -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(args.iter().copied())?;
    run(&cli)
}

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_render_arguments_parse() {
    let cli = Cli::try_parse_from([
        "schemadoc",
        "-vv",
        "render",
        "--input",
        "snapshot.json",
        "--format",
        "dot",
        "--no-info",
        "--info-level",
        "maximum",
    ])
    .unwrap();

    assert_eq!(cli.global.verbose, 2);
    assert!(matches!(cli.command, Command::Render(_)));
    if let Command::Render(args) = cli.command {
        assert_eq!(args.format, FormatArg::Dot);
        assert!(args.no_info);
        assert!(args.output.is_none());

        let options = args.render_options().unwrap();
        assert!(options.no_info);
        assert!(options.verbose_database_info);
    }
}

#[test]
fn test_global_flags_parse() {
    let cli = Cli::try_parse_from(["schemadoc", "--quiet", "options"]).unwrap();
    assert!(cli.global.quiet);
    assert_eq!(cli.global.verbose, 0);
    assert!(matches!(cli.command, Command::Options));

    let cli = Cli::try_parse_from(["schemadoc", "--verbose", "-v", "-q", "options"]).unwrap();
    assert_eq!(cli.global.verbose, 2);
    assert!(cli.global.quiet);
}

#[test]
fn test_unknown_format_is_rejected() {
    assert!(Cli::try_parse_from(["schemadoc", "render", "-i", "x.json", "-f", "pdf"]).is_err());
}

#[test]
fn test_render_text_file() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);
    let output = dir.path().join("report.txt");

    run_args(&[
        "schemadoc",
        "render",
        "--input",
        &input,
        "--output",
        output.to_str().unwrap(),
        "--title",
        "Inventory",
        "--show-database-info",
    ])
    .unwrap();

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("Inventory\n"));
    assert!(report.contains("System Information"));
    assert!(report.contains("H2 2.1"));
}

#[test]
fn test_render_html_file_with_config() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);
    let config = dir.path().join("options.json");
    fs::write(
        &config,
        r#"{ "title": "Inventory", "no_footer": true, "show_jdbc_driver_info": true }"#,
    )
    .unwrap();
    let output = dir.path().join("report.html");

    run_args(&[
        "schemadoc",
        "render",
        "-i",
        &input,
        "-f",
        "html",
        "-c",
        config.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("<!DOCTYPE html>"));
    assert!(report.contains("<h1>Inventory</h1>"));
    assert!(!report.contains("</html>"));
    assert!(report.contains("driver version"));
}

#[test]
fn test_render_dot_file() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);
    let output = dir.path().join("diagram.dot");

    run_args(&[
        "schemadoc",
        "render",
        "-i",
        &input,
        "-f",
        "dot",
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();

    let diagram = fs::read_to_string(&output).unwrap();
    assert!(diagram.starts_with("digraph"));
    assert!(diagram.contains("generated on"));
    assert!(diagram.trim_end().ends_with('}'));
}

#[test]
fn test_invalid_snapshot_leaves_existing_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();
    let output = dir.path().join("report.txt");
    fs::write(&output, "previous report").unwrap();

    let result = run_args(&[
        "schemadoc",
        "render",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous report");
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);
    let config = dir.path().join("options.json");
    fs::write(
        &config,
        r#"{ "graphviz_attributes": { "graph.label": "two\nlines" } }"#,
    )
    .unwrap();

    let result = run_args(&[
        "schemadoc",
        "render",
        "-i",
        &input,
        "-c",
        config.to_str().unwrap(),
    ]);

    assert!(result.is_err());
}

#[test]
fn test_missing_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");

    let error = run_args(&["schemadoc", "render", "-i", missing.to_str().unwrap()]).unwrap_err();
    assert!(error.to_string().contains("Failed to read snapshot"));
}

#[test]
fn test_write_atomically_discards_failed_writes() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");

    let result = write_atomically(&output, |_file| anyhow::bail!("render failed"));

    assert!(result.is_err());
    assert!(!output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_write_atomically_replaces_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");
    fs::write(&output, "old").unwrap();

    write_atomically(&output, |file| {
        use std::io::Write;
        file.write_all(b"new")?;
        Ok(())
    })
    .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "new");
}
