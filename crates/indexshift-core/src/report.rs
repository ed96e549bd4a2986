//! Aggregated outcomes of one migration run.

use crate::descriptor::MigrationDescriptor;
use crate::index_name::IndexName;
use crate::outcome::StepOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of the per-index steps for one event index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    pub index: IndexName,

    /// Mapping update outcome
    pub mapping: StepOutcome,

    /// Backfill outcome; `None` when the mapping update did not apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backfill: Option<StepOutcome>,
}

impl IndexReport {
    pub fn is_success(&self) -> bool {
        self.mapping.is_applied() && self.backfill.as_ref().is_some_and(StepOutcome::is_applied)
    }
}

/// Report for one migration, filled in step by step by the orchestrator.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub migration: MigrationDescriptor,

    pub started_at: DateTime<Utc>,

    /// Per-index outcomes, in processing order
    pub indices: Vec<IndexReport>,

    /// Auxiliary index creation or skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aux_index: Option<StepOutcome>,

    /// Scope value aggregation; `None` when there were no indices to search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_values: Option<StepOutcome>,

    /// Number of distinct scope values found
    pub scope_values: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_insert: Option<StepOutcome>,
}

impl MigrationReport {
    pub fn new(migration: MigrationDescriptor) -> Self {
        Self {
            migration,
            started_at: Utc::now(),
            indices: Vec::new(),
            aux_index: None,
            distinct_values: None,
            scope_values: 0,
            bulk_insert: None,
        }
    }

    /// Every recorded outcome, per-index steps first.
    pub fn outcomes(&self) -> impl Iterator<Item = &StepOutcome> {
        self.indices
            .iter()
            .flat_map(|r| std::iter::once(&r.mapping).chain(r.backfill.iter()))
            .chain(self.aux_index.iter())
            .chain(self.distinct_values.iter())
            .chain(self.bulk_insert.iter())
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes().filter(|o| o.is_failed()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// Indices whose mapping update or backfill failed and need a re-run.
    pub fn failed_indices(&self) -> Vec<&IndexName> {
        self.indices
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| &r.index)
            .collect()
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
