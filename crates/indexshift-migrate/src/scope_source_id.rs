//! 1.5.0 -> 2.0.0: `sourceId` on event indices and the scope index

use crate::context::MigrationContext;
use crate::error::MigrateResult;
use crate::migration::Migration;
use crate::steps;
use async_trait::async_trait;
use indexshift_core::{IndexReport, MigrationDescriptor, MigrationReport, Version};

const DESCRIPTION: &str = "Updates mapping for an index \"event\" with prefix \"context\" by default. \
Adds the \"sourceId\" field and copies value from the \"scope\" field to it. \
Creates the scope entries in the index \"scope\" from the existing scopes of the events";

/// Adds `sourceId` to every `<prefix>-event*` index, backfills it from
/// `scope`, and seeds `<prefix>-scope` with one document per scope value.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScopeSourceIdMigration;

impl ScopeSourceIdMigration {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Migration for ScopeSourceIdMigration {
    fn descriptor(&self) -> MigrationDescriptor {
        MigrationDescriptor::new(Version::new(1, 5, 0), Version::new(2, 0, 0), DESCRIPTION)
    }

    async fn execute(&self, ctx: &MigrationContext<'_>) -> MigrateResult<MigrationReport> {
        let mut report = MigrationReport::new(self.descriptor());
        let prefix = ctx.params.index_prefix.as_str();

        let indices = steps::discover_indices(ctx, prefix).await?;
        if indices.is_empty() {
            log::info!("No event indices found for prefix \"{}\"", prefix);
        }

        for index in &indices {
            let mapping = steps::update_mapping(ctx, index).await?;
            let backfill = if mapping.is_applied() {
                Some(steps::backfill_field(ctx, index).await?)
            } else {
                None
            };
            report.indices.push(IndexReport {
                index: index.clone(),
                mapping,
                backfill,
            });
        }

        report.aux_index = Some(steps::ensure_aux_index(ctx).await?);

        let extraction = steps::extract_distinct_values(ctx, &indices).await?;
        report.distinct_values = extraction.outcome;
        report.scope_values = extraction.values.len();

        if !indices.is_empty() {
            report.bulk_insert = Some(steps::bulk_insert(ctx, &extraction.values).await?);
        }

        Ok(report)
    }
}
