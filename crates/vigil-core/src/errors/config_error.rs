//! Configuration loading errors.

use super::error_code::{self, VigilErrorCode};
use std::path::PathBuf;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read config file {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    #[error("Failed to parse config: {message}")]
    ParseFailed { message: String },
}

impl VigilErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
