//! Database metadata report and diagram renderer.
//!
//! Logging goes to standard error so rendered documents written to
//! standard output stay clean.

use clap::Parser;
use schemadoc::{Cli, run};
use schemadoc_core::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    run(&cli)
}
