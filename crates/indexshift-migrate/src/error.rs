//! Error types for indexshift-migrate

use indexshift_client::ClientError;
use indexshift_core::CoreError;
use indexshift_template::TemplateError;
use thiserror::Error;

/// Errors that abort a migration run.
///
/// Soft, per-index failures are not errors; they are reported as
/// [`StepOutcome::Failed`](indexshift_core::StepOutcome::Failed).
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Search engine unreachable (M001)
    #[error("[M001] {0}")]
    Client(#[from] ClientError),

    /// Request body could not be produced (M002)
    #[error("[M002] {0}")]
    Template(#[from] TemplateError),

    /// Auxiliary index creation failed (M003)
    #[error("[M003] Can not create the index {index} (status {status}). Stopping the migration")]
    AuxIndexCreation {
        index: String,
        status: u16,
        body: String,
    },

    /// A 200 response whose body is unusable (M004)
    #[error("[M004] Unexpected response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// A migration in a registry run failed (M005)
    #[error("[M005] Migration {migration} failed: {source}")]
    MigrationFailed {
        migration: String,
        #[source]
        source: Box<MigrateError>,
    },

    /// Invalid parameters (M006)
    #[error("[M006] {0}")]
    Core(#[from] CoreError),
}

impl MigrateError {
    /// The innermost error, looking through `MigrationFailed` wrappers
    pub fn root(&self) -> &MigrateError {
        match self {
            MigrateError::MigrationFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
