//! Strongly-typed index name wrapper.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;

/// Characters the search engine refuses in index names.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':'];

/// Suffix shared by every event index of a prefix (`<prefix>-event*`).
pub const EVENT_SUFFIX: &str = "-event";

/// Suffix of the auxiliary scope index (`<prefix>-scope`).
pub const SCOPE_SUFFIX: &str = "-scope";

/// Set of indices discovered for one prefix.
///
/// Ordered so that per-index log lines come out in a stable order.
pub type IndexSet = BTreeSet<IndexName>;

/// Strongly-typed wrapper for search-engine index names.
///
/// Prevents accidental mixing of index names with prefixes, field names,
/// or scope values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexName(String);

impl IndexName {
    /// Create a new `IndexName`, panicking in debug builds if the name is empty.
    ///
    /// Prefer [`parse`](Self::parse) when handling untrusted input.
    pub fn new(name: impl Into<String>) -> Self {
        let s = name.into();
        debug_assert!(!s.is_empty(), "IndexName must not be empty");
        Self(s)
    }

    /// Try to create a new `IndexName`, returning `None` if the name is invalid.
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        Self::parse(name).ok()
    }

    /// Validate and wrap an index name.
    pub fn parse(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self(name))
    }

    /// Name of the auxiliary scope index for a prefix.
    pub fn scope_index(prefix: &str) -> CoreResult<Self> {
        Self::parse(format!("{}{}", prefix, SCOPE_SUFFIX))
    }

    /// Returns `true` if this index follows the `<prefix>-event*` convention.
    pub fn is_event_index_of(&self, prefix: &str) -> bool {
        self.0.starts_with(&event_prefix(prefix))
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// `<prefix>-event`, the leading part shared by all event indices of a prefix.
pub fn event_prefix(prefix: &str) -> String {
    format!("{}{}", prefix, EVENT_SUFFIX)
}

/// Validate an index prefix supplied by an operator or a config file.
pub fn validate_prefix(prefix: &str) -> CoreResult<()> {
    validate_name(prefix)
}

fn validate_name(name: &str) -> CoreResult<()> {
    let invalid = |reason: &str| CoreError::InvalidIndexName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name.starts_with(['-', '_', '+']) {
        return Err(invalid("must not start with '-', '_' or '+'"));
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(invalid("must be lowercase"));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid(&format!("contains forbidden character '{}'", c)));
    }
    Ok(())
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IndexName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for IndexName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IndexName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for IndexName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for IndexName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "index_name_test.rs"]
mod tests;
