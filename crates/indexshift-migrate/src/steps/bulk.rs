use crate::context::MigrationContext;
use crate::error::MigrateResult;
use indexshift_client::ContentType;
use indexshift_core::{BulkVerification, ScopeSet, StepOutcome};
use indexshift_template::names::BULK_SAVE_SCOPE;
use indexshift_template::Substitutions;
use serde_json::Value;

/// How many failing ids a strict-verification failure names
const REPORTED_FAILURES: usize = 5;

/// Index one scope document per value with a single bulk request.
///
/// Document ids are the scope values, so re-running overwrites instead of
/// duplicating.
pub async fn bulk_insert(ctx: &MigrationContext<'_>, values: &ScopeSet) -> MigrateResult<StepOutcome> {
    if values.is_empty() {
        log::info!("No scopes to insert");
        return Ok(StepOutcome::success("nothing to insert"));
    }

    let mut body = String::new();
    for value in values {
        let mut subs = Substitutions::new();
        subs.insert_json_str("scope", value.as_str());
        let fragment = ctx.templates.render(BULK_SAVE_SCOPE, &subs)?;
        body.push_str(&fragment);
        if !fragment.ends_with('\n') {
            body.push('\n');
        }
    }

    let index = ctx.params.scope_index_name()?;
    let path = format!("{}/_bulk", index);
    let resp = ctx.client.post(&path, &body, ContentType::NdJson).await?;

    if !resp.is_ok() {
        let reason = super::error_reason(&resp.body);
        log::error!(
            "Failed to insert scopes into {} (status {}): {}",
            index,
            resp.status,
            reason
        );
        return Ok(StepOutcome::failed(reason, Some(resp.status)));
    }

    if ctx.params.bulk_verification == BulkVerification::Strict {
        if let Some(outcome) = verify_items(&resp.body, resp.status) {
            return Ok(outcome);
        }
    }

    log::info!("Inserted {} scope(s) into {}", values.len(), index);
    Ok(StepOutcome::success(format!("{} scope(s) inserted", values.len())))
}

/// Inspect per-item results; `Some` when any item failed.
fn verify_items(body: &str, status: u16) -> Option<StepOutcome> {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => {
            return Some(StepOutcome::failed(
                format!("unparsable bulk response: {}", e),
                Some(status),
            ))
        }
    };
    if !json.get("errors").and_then(Value::as_bool).unwrap_or(false) {
        return None;
    }

    let failed: Vec<String> = json
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object()?.values().next())
                .filter(|result| result.get("error").is_some())
                .map(|result| {
                    result
                        .get("_id")
                        .and_then(Value::as_str)
                        .unwrap_or("?")
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default();

    let shown = failed
        .iter()
        .take(REPORTED_FAILURES)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let reason = format!("{} bulk item(s) failed: {}", failed.len(), shown);
    log::error!("{}", reason);
    Some(StepOutcome::failed(reason, Some(status)))
}

#[cfg(test)]
#[path = "bulk_test.rs"]
mod tests;
