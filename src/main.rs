//! CLI entry point for the cat map orbit tool

use catorbit::io::cli::{Cli, FileProcessor};
use clap::Parser;

fn main() -> catorbit::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}
