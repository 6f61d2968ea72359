//! Command line layer for era5cli.
//!
//! Argument parsing (`args`), CLI errors (`errors`) and the orchestration of
//! the `hourly`, `monthly`, `info` and `config` subcommands (`runner`).
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
