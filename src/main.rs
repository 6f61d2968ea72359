//! era5cli entrypoint.
//!
//! A thin wrapper over the `cli` module: parse args, run the subcommand and
//! exit non-zero when it fails. For programmatic use, prefer the library.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
