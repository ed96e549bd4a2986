//! Distinct scope values collected from event documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Deduplicated scope values gathered across an index set.
pub type ScopeSet = BTreeSet<ScopeValue>;

/// A tenant/application identifier taken from the `scope` field of events.
///
/// Unlike [`IndexName`](crate::IndexName) there is no naming rule: the value
/// is whatever the documents carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeValue(String);

impl ScopeValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScopeValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ScopeValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}
