use crate::context::MigrationContext;
use crate::error::{MigrateError, MigrateResult};
use indexshift_core::index_name::event_prefix;
use indexshift_core::{IndexName, IndexSet};

const ALIASES_PATH: &str = "_aliases";

/// List the indices named `<prefix>-event*`.
///
/// Only exact prefix matches are returned, so unrelated indices are never
/// touched. A non-200 answer yields an empty set.
pub async fn discover_indices(ctx: &MigrationContext<'_>, prefix: &str) -> MigrateResult<IndexSet> {
    let resp = ctx.client.get(ALIASES_PATH).await?;
    if !resp.is_ok() {
        log::warn!(
            "Listing indices failed with status {}: {}",
            resp.status,
            super::error_reason(&resp.body)
        );
        return Ok(IndexSet::new());
    }

    let json = resp.json().map_err(|e| MigrateError::InvalidResponse {
        endpoint: ALIASES_PATH.to_string(),
        message: e.to_string(),
    })?;
    let Some(names) = json.as_object() else {
        return Err(MigrateError::InvalidResponse {
            endpoint: ALIASES_PATH.to_string(),
            message: "expected a JSON object keyed by index name".to_string(),
        });
    };

    let wanted = event_prefix(prefix);
    let indices: IndexSet = names
        .keys()
        .filter(|name| name.starts_with(&wanted))
        .filter_map(|name| IndexName::try_new(name.as_str()))
        .collect();

    log::info!(
        "Found {} index(es) matching \"{}*\"",
        indices.len(),
        wanted
    );
    Ok(indices)
}

#[cfg(test)]
#[path = "discover_test.rs"]
mod tests;
