//! CLI-specific error types
//!
//! Every CLI error is fatal: the process reports it and exits non-zero.

use std::fmt;
use std::io;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, filesystem)
    IoError,
    /// Storage root already initialized
    AlreadyInitialized,
    /// Boot failed (storage root or server could not start)
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "DEPOT_CLI_CONFIG_ERROR",
            Self::IoError => "DEPOT_CLI_IO_ERROR",
            Self::AlreadyInitialized => "DEPOT_CLI_ALREADY_INITIALIZED",
            Self::BootFailed => "DEPOT_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Already initialized
    pub fn already_initialized(root: impl Into<String>) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Storage root already exists: {}", root.into()),
        )
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// The stable code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// The human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::io_error(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::io_error(format!("Invalid JSON: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_message() {
        let err = CliError::config_error("missing storage_root");
        let rendered = err.to_string();
        assert!(rendered.contains("DEPOT_CLI_CONFIG_ERROR"));
        assert!(rendered.contains("missing storage_root"));
    }

    #[test]
    fn test_already_initialized_names_root() {
        let err = CliError::already_initialized("/var/depot");
        assert_eq!(err.code_str(), "DEPOT_CLI_ALREADY_INITIALIZED");
        assert!(err.message().contains("/var/depot"));
    }
}
