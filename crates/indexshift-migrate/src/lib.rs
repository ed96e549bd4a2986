//! indexshift-migrate - Migration steps and orchestration for Indexshift
//!
//! Each step in [`steps`] is one idempotent unit of work against the
//! search engine. [`ScopeSourceIdMigration`] sequences them for the
//! 1.5.0 -> 2.0.0 schema transition and [`MigrationRegistry`] picks the
//! migrations to run for a recorded schema version.
//!
//! Steps never prompt: every operator-supplied value arrives through the
//! immutable [`MigrationContext`].

pub mod context;
pub mod error;
pub mod migration;
pub mod registry;
pub mod scope_source_id;
pub mod steps;

pub use context::{MigrationContext, MigrationParams};
pub use error::{MigrateError, MigrateResult};
pub use migration::Migration;
pub use registry::MigrationRegistry;
pub use scope_source_id::ScopeSourceIdMigration;
