//! CLI entry point for the procedural composition generator

use clap::Parser;
use glyphcompose::io::cli::{BatchRunner, Cli};
use glyphcompose::io::logging::init_tracing;

fn main() -> glyphcompose::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut runner = BatchRunner::new(cli);
    runner.run().map(|_| ())
}
