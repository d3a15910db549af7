//! Command line interface.
//!
//! `args` defines the subcommands, `errors` the CLI-specific failures and
//! `runner` maps each subcommand onto the library calls. The CLI keeps no
//! state between invocations.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
