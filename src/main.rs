//! CLI entry point for weighted Voronoi stippling

use clap::Parser;
use stipple::io::cli::{Cli, FileProcessor};

fn main() -> stipple::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
