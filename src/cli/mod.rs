//! CLI module for tfrec
//!
//! Provides the command-line surface:
//! - verify: stream a record file, halt on first corruption
//! - count: print the record count
//! - stats: print payload size statistics as JSON

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{count, run_command, stats, verify};
pub use errors::{CliError, CliResult};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
