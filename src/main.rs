use argos_import::cli::{run, Cli};
use argos_import::error::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
