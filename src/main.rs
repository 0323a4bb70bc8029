use anyhow::Result;
use clap::Parser;

use runlens::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);
    cli.execute()
}
