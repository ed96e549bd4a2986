use crate::context::MigrationContext;
use crate::error::MigrateResult;
use indexshift_client::ContentType;
use indexshift_core::{IndexName, StepOutcome};
use indexshift_template::names::{COPY_SCOPE_TO_SOURCE_ID, UPDATE_MAPPING};
use indexshift_template::Substitutions;

/// Reason reported when the engine answers 200 without `acknowledged: true`
pub const NOT_ACKNOWLEDGED: &str = "mapping update not acknowledged";

/// Add the `sourceId` keyword field to one index.
///
/// Re-applying an identical mapping is accepted by the engine, so a second
/// run reports `Success` again.
pub async fn update_mapping(ctx: &MigrationContext<'_>, index: &IndexName) -> MigrateResult<StepOutcome> {
    let body = ctx.templates.render(UPDATE_MAPPING, &Substitutions::new())?;
    let path = format!("{}/_mapping", index);
    let resp = ctx.client.put(&path, &body).await?;

    if !resp.is_ok() {
        let reason = super::error_reason(&resp.body);
        log::warn!(
            "Failed to update mapping of {} (status {}): {}",
            index,
            resp.status,
            reason
        );
        return Ok(StepOutcome::failed(reason, Some(resp.status)));
    }

    let acknowledged = resp
        .json()
        .ok()
        .and_then(|json| json.get("acknowledged").and_then(|a| a.as_bool()))
        .unwrap_or(false);
    if !acknowledged {
        log::warn!("Mapping update of {} was not acknowledged", index);
        return Ok(StepOutcome::failed(NOT_ACKNOWLEDGED, Some(resp.status)));
    }

    log::info!("Updated mapping of {}", index);
    Ok(StepOutcome::success("sourceId field added"))
}

/// Copy `scope` into `sourceId` for every document of one index.
pub async fn backfill_field(ctx: &MigrationContext<'_>, index: &IndexName) -> MigrateResult<StepOutcome> {
    let body = ctx
        .templates
        .render(COPY_SCOPE_TO_SOURCE_ID, &Substitutions::new())?;
    let path = format!("{}/_update_by_query", index);
    let resp = ctx.client.post(&path, &body, ContentType::Json).await?;

    if !resp.is_ok() {
        let reason = super::error_reason(&resp.body);
        log::warn!(
            "Failed to copy scope to sourceId in {} (status {}): {}",
            index,
            resp.status,
            reason
        );
        return Ok(StepOutcome::failed(reason, Some(resp.status)));
    }

    let json = resp.json().unwrap_or_default();
    let count = |key: &str| json.get(key).and_then(|v| v.as_u64()).unwrap_or(0);
    let details = format!("total: {}, updated: {}", count("total"), count("updated"));
    log::info!("Copied scope to sourceId in {} ({})", index, details);
    Ok(StepOutcome::success(details))
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
