//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Far Cry server session log analyzer.
///
/// Reconstructs the frag history of one multiplayer session and renders or
/// exports it.
#[derive(Debug, Parser)]
#[command(name = "fraglog", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the reconstructed session: metadata, match window, frag lines.
    Report {
        /// Path to the server log file.
        log: PathBuf,

        /// Emit the full report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Write the frag history to a delimited (CSV) file.
    Export {
        /// Path to the server log file.
        log: PathBuf,

        /// Output file path.
        out: PathBuf,
    },
}
