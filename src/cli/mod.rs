//! CLI module
//!
//! Provides:
//! - Argument parsing (clap)
//! - Data directory resolution (flag → env → platform default → cwd)
//! - Logging setup
//! - Command dispatch and the interactive study/chat loops

pub mod args;
pub mod data_dir;
pub mod dispatch;
pub mod interactive;
pub mod logging;

// Re-exports
pub use args::{AdminAction, Cli, Command};
pub use data_dir::{resolve_config_path, resolve_data_dir};
pub use dispatch::{run, ExitCode};
pub use logging::init_logging;

use crate::config::ConfigError;
use crate::llm::{AdapterError, GenerationFailure};
use crate::selection::SelectionError;
use copilot_core::AccessDenied;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Data directory error: {0}")]
    DataDir(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider could not be set up from the config
    #[error("{0}")]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("{0}")]
    Generation(#[from] GenerationFailure),

    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::DataDir(_) | Error::Config(_) | Error::Adapter(_) => EXIT_CONFIG_ERROR,
            _ => EXIT_FAILURE,
        }
    }
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::DataDir("x".into()).exit_code(), EXIT_CONFIG_ERROR);
        assert_eq!(
            Error::Adapter(AdapterError::Configuration("no key".into())).exit_code(),
            EXIT_CONFIG_ERROR
        );
        assert_eq!(Error::AccessDenied(AccessDenied).exit_code(), EXIT_FAILURE);
        assert_eq!(
            Error::Generation(GenerationFailure::new("quota exceeded")).exit_code(),
            EXIT_FAILURE
        );
    }

    #[test]
    fn test_generation_message_passthrough() {
        let err = Error::Generation(GenerationFailure::new("quota exceeded"));
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
