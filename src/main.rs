use anyhow::Result;
use clap::Parser;

use wordflip::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
