//! CLI command implementations
//!
//! `init` creates the configured storage root and refuses to run twice.
//! `serve` opens the storage engine (creating the root if missing, fatal on
//! failure) and runs the HTTP server.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http_server::{FilesState, HttpServer, HttpServerConfig};
use crate::store::DiskStore;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage root directory (required)
    pub storage_root: String,

    /// Host to bind to (optional, default "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (optional, default 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (optional, empty = permissive)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.storage_root.trim().is_empty() {
            return Err(CliError::config_error("storage_root must not be empty"));
        }
        if self.port == 0 {
            return Err(CliError::config_error("port must be non-zero"));
        }
        Ok(())
    }

    /// The configured storage root as a path
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }

    /// The HTTP server slice of the configuration
    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create the configured storage root
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let root = config.storage_path();

    if root.exists() {
        return Err(CliError::already_initialized(root.display().to_string()));
    }

    fs::create_dir_all(&root).map_err(|e| {
        CliError::config_error(format!(
            "Failed to create storage root {}: {}",
            root.display(),
            e
        ))
    })?;

    write_response(json!({
        "initialized": true,
        "storage_root": root.display().to_string()
    }))?;

    Ok(())
}

/// Open the storage engine and run the HTTP server until shutdown
pub fn serve(config_path: &Path, port_override: Option<u16>) -> CliResult<()> {
    let config = Config::load(config_path)?;

    // Startup precondition: the root must exist (created here if missing)
    // before the first request is served.
    let store = DiskStore::open(&config.storage_path())
        .map_err(|e| CliError::boot_failed(format!("Cannot open storage root: {}", e)))?;

    let mut http_config = config.http_config();
    if let Some(port) = port_override {
        http_config.port = port;
    }

    let state = Arc::new(FilesState::new(store));
    let server = HttpServer::new(http_config, state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}
