//! Immutable inputs shared by every step of a run

use crate::error::MigrateResult;
use indexshift_client::IndexClient;
use indexshift_core::index_name::validate_prefix;
use indexshift_core::{BulkVerification, Config, IndexName, ScopeIndexSettings};
use indexshift_template::TemplateSet;

/// Operator-supplied values, fully resolved before a run starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationParams {
    /// Prefix of the indices to migrate
    pub index_prefix: String,
    /// Settings used if the scope index must be created
    pub scope_index: ScopeIndexSettings,
    pub bulk_verification: BulkVerification,
}

impl MigrationParams {
    /// Parameters with defaults for everything but the prefix
    pub fn new(index_prefix: impl Into<String>) -> Self {
        Self {
            index_prefix: index_prefix.into(),
            scope_index: ScopeIndexSettings::default(),
            bulk_verification: BulkVerification::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            index_prefix: config.index_prefix.clone(),
            scope_index: config.scope_index,
            bulk_verification: config.bulk_verification,
        }
    }

    /// Check the prefix and creation settings
    pub fn validate(&self) -> MigrateResult<()> {
        validate_prefix(&self.index_prefix)?;
        self.scope_index.validate()?;
        Ok(())
    }

    /// `<prefix>-scope`
    pub fn scope_index_name(&self) -> MigrateResult<IndexName> {
        Ok(IndexName::scope_index(&self.index_prefix)?)
    }
}

/// Everything a step needs, passed by reference into each step.
pub struct MigrationContext<'a> {
    pub client: &'a dyn IndexClient,
    pub templates: &'a TemplateSet,
    pub params: MigrationParams,
}

impl<'a> MigrationContext<'a> {
    pub fn new(
        client: &'a dyn IndexClient,
        templates: &'a TemplateSet,
        params: MigrationParams,
    ) -> Self {
        Self {
            client,
            templates,
            params,
        }
    }
}

impl std::fmt::Debug for MigrationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationContext")
            .field("address", &self.client.address())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
