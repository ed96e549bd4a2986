//! Ordered set of known migrations

use crate::context::MigrationContext;
use crate::error::{MigrateError, MigrateResult};
use crate::migration::Migration;
use crate::scope_source_id::ScopeSourceIdMigration;
use indexshift_core::{MigrationDescriptor, MigrationReport, Version};

/// Migrations sorted by `from_version`, ascending.
#[derive(Default)]
pub struct MigrationRegistry {
    migrations: Vec<Box<dyn Migration>>,
}

impl std::fmt::Debug for MigrationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationRegistry")
            .field("migrations", &self.descriptors())
            .finish()
    }
}

impl MigrationRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every migration shipped with indexshift
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ScopeSourceIdMigration::new()));
        registry
    }

    pub fn register(&mut self, migration: Box<dyn Migration>) {
        self.migrations.push(migration);
        self.migrations
            .sort_by_key(|m| m.descriptor().from_version);
    }

    pub fn descriptors(&self) -> Vec<MigrationDescriptor> {
        self.migrations.iter().map(|m| m.descriptor()).collect()
    }

    /// Highest `to_version` of any registered migration
    pub fn latest_version(&self) -> Option<Version> {
        self.migrations.iter().map(|m| m.descriptor().to_version).max()
    }

    /// Migrations to apply for a cluster recorded at `current`.
    ///
    /// Selects every migration with `from_version >= current` and
    /// `to_version <= target` (default: latest), in ascending order.
    pub fn plan(&self, current: &Version, target: Option<&Version>) -> Vec<&dyn Migration> {
        let Some(latest) = self.latest_version() else {
            return Vec::new();
        };
        let target = target.unwrap_or(&latest);
        self.migrations
            .iter()
            .filter(|m| {
                let descriptor = m.descriptor();
                descriptor.from_version >= *current && descriptor.to_version <= *target
            })
            .map(|m| m.as_ref())
            .collect()
    }

    /// Execute the plan in order.
    ///
    /// Stops at the first fatal error, and after a migration whose report
    /// contains failed steps, since later migrations build on its result.
    pub async fn run(
        &self,
        ctx: &MigrationContext<'_>,
        current: &Version,
        target: Option<&Version>,
    ) -> MigrateResult<Vec<MigrationReport>> {
        let plan = self.plan(current, target);
        if plan.is_empty() {
            log::info!("No migration applies to schema version {}", current);
            return Ok(Vec::new());
        }

        let mut reports = Vec::with_capacity(plan.len());
        for migration in plan {
            let descriptor = migration.descriptor();
            log::info!("Running migration {}", descriptor.label());

            let report = migration
                .execute(ctx)
                .await
                .map_err(|e| MigrateError::MigrationFailed {
                    migration: descriptor.label(),
                    source: Box::new(e),
                })?;

            let failures = report.failure_count();
            reports.push(report);
            if failures > 0 {
                log::warn!(
                    "Migration {} finished with {} failed step(s); not running later migrations",
                    descriptor.label(),
                    failures
                );
                break;
            }
            log::info!("Migration {} complete", descriptor.label());
        }
        Ok(reports)
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
