use anyhow::Result;
use clap::Parser;
use expense_tracker::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    cli.run()
}
