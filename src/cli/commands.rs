//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Airwave radio backend CLI
#[derive(Parser, Debug)]
#[command(name = "airwave")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides the configuration file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate the configuration and report what it loads
    Check,

    /// Print pages of the play history
    Tracks {
        /// Tracks per page (1-25)
        #[arg(short, long, default_value = "1")]
        limit: usize,

        /// Skip advertisement entries
        #[arg(long)]
        filter_ads: bool,

        /// Resume after this cursor
        #[arg(long)]
        after: Option<String>,

        /// Walk the history page by page until it is exhausted
        #[arg(long)]
        all: bool,
    },
}
