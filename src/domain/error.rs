//! Domain error types

use thiserror::Error;

/// Error when a directive field value cannot be parsed
#[derive(Debug, Clone, Error)]
#[error("Invalid value \"{input}\" for {field}. Valid options are: {options}")]
pub struct InvalidFieldValue {
    pub field: &'static str,
    pub input: String,
    pub options: &'static str,
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
