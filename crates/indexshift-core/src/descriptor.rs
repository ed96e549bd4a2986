//! Static identity of a migration.

use crate::error::{CoreError, CoreResult};
use semver::Version;
use serde::Serialize;
use std::fmt;

/// Version transition performed by one migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationDescriptor {
    pub from_version: Version,
    pub to_version: Version,
    pub description: String,
}

impl MigrationDescriptor {
    pub fn new(from_version: Version, to_version: Version, description: impl Into<String>) -> Self {
        debug_assert!(from_version < to_version, "migration must move forward");
        Self {
            from_version,
            to_version,
            description: description.into(),
        }
    }

    /// Short label used in log lines and reports, e.g. `1.5.0 -> 2.0.0`.
    pub fn label(&self) -> String {
        format!("{} -> {}", self.from_version, self.to_version)
    }
}

impl fmt::Display for MigrationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.description)
    }
}

/// Parse an operator-supplied version.
///
/// Accepts the short forms `2` and `1.5` as well as full `1.5.0`.
pub fn parse_version(value: &str) -> CoreResult<Version> {
    let trimmed = value.trim();
    let normalized = match trimmed.split('.').count() {
        1 => format!("{}.0.0", trimmed),
        2 => format!("{}.0", trimmed),
        _ => trimmed.to_string(),
    };
    Version::parse(&normalized).map_err(|e| CoreError::InvalidVersion {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
