//! Error types for indexshift-template

use thiserror::Error;

/// Template loading and rendering errors
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template name does not resolve (T001)
    #[error("[T001] Template not found: {name}")]
    ResourceNotFound { name: String },

    /// Placeholders left without a value in strict mode (T002)
    #[error("[T002] Unresolved placeholders in {template}: {placeholders}")]
    UnresolvedPlaceholder {
        template: String,
        placeholders: String,
    },

    /// Override file could not be read (T003)
    #[error("[T003] Failed to read template '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for TemplateError
pub type TemplateResult<T> = Result<T, TemplateError>;
