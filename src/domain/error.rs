//! Domain error types

use thiserror::Error;

/// Reasons an upload is rejected before any external call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No audio file provided")]
    MissingFile,

    #[error("Audio file is empty")]
    EmptyFile,

    #[error("Unsupported media type: \"{mime_type}\". Only audio files are allowed")]
    UnsupportedMediaType { mime_type: String },

    #[error("Audio file is {size} bytes, which exceeds the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
