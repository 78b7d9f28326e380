//! CLI argument definitions using clap
//!
//! Commands:
//! - tfrec verify <file>
//! - tfrec count <file>
//! - tfrec stats <file>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tfrec - a strict reader and writer for the TFRecord container format
#[derive(Parser, Debug)]
#[command(name = "tfrec")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify every record in a file, halting on the first corruption
    Verify {
        /// Path to the record file
        file: PathBuf,
    },

    /// Print the number of records in a file
    Count {
        /// Path to the record file
        file: PathBuf,
    },

    /// Print record count and payload size statistics as JSON
    Stats {
        /// Path to the record file
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
