//! imagebox CLI entrypoint.
//!
//! Parses arguments and hands them to the `cli` runner. For programmatic
//! use, call the library crates directly.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
