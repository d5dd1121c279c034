//! CLI argument definitions using clap
//!
//! Commands:
//! - filedepot init --config <path>
//! - filedepot serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Filedepot - a self-hostable file storage service
#[derive(Parser, Debug)]
#[command(name = "filedepot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the configured storage root
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./filedepot.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./filedepot.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
