//! The unit the registry schedules

use crate::context::MigrationContext;
use crate::error::MigrateResult;
use async_trait::async_trait;
use indexshift_core::{MigrationDescriptor, MigrationReport};

/// One schema version transition.
///
/// `execute` returns `Err` only for fatal conditions (transport failure,
/// missing template, aux index creation failure). Soft per-step failures are
/// recorded in the report.
#[async_trait]
pub trait Migration: Send + Sync {
    fn descriptor(&self) -> MigrationDescriptor;

    async fn execute(&self, ctx: &MigrationContext<'_>) -> MigrateResult<MigrationReport>;
}
