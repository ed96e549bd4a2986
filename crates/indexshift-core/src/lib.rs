//! indexshift-core - Core library for Indexshift
//!
//! This crate provides the shared vocabulary used by every Indexshift
//! component: index and scope names, step outcomes, migration descriptors,
//! run reports, and the `indexshift.yml` configuration.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod index_name;
pub mod outcome;
pub mod report;
pub mod scope_value;

pub use config::{BulkVerification, Config, ScopeIndexSettings, TemplateMode, TemplatesConfig};
pub use descriptor::{parse_version, MigrationDescriptor};
pub use error::{CoreError, CoreResult};
pub use index_name::{IndexName, IndexSet};
pub use outcome::StepOutcome;
pub use report::{IndexReport, MigrationReport};
pub use scope_value::{ScopeSet, ScopeValue};
pub use semver::Version;
