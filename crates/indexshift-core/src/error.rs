//! Error types for indexshift-core

use thiserror::Error;

/// Core error type for Indexshift
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: IO error with file path context
    #[error("[E004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E005: Version string is not a semantic version
    #[error("[E005] Invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    /// E006: Index name violates the naming rules
    #[error("[E006] Invalid index name '{name}': {reason}")]
    InvalidIndexName { name: String, reason: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
