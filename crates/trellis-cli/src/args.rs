//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global arguments select the configuration file and the
//! logging verbosity; the [`Command`] picks what to do.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Trellis theme tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// The operation to run.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Resolve theme elements against the configured theme and print them
    Resolve {
        /// Element names, e.g. `axis.text.x`
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        elements: Vec<String>,

        /// Resolve every element of the element tree
        #[arg(long)]
        all: bool,
    },

    /// Print every element with its kind and parents
    Tree,

    /// Fill-adjust (or stack) the `[[rows]]` of a TOML file
    Fill {
        /// Path to the input rows file
        input: String,

        /// Path to the output file; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,

        /// Stack without rescaling to the unit interval
        #[arg(long)]
        stack: bool,
    },
}
