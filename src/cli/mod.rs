//! CLI module for filedepot
//!
//! Provides the command-line interface:
//! - init: Create the configured storage root
//! - serve: Open the storage engine and run the HTTP server

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, Config};
pub use errors::{CliError, CliResult};
pub use io::{write_error, write_response};
