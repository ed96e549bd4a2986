use crate::context::MigrationContext;
use crate::error::MigrateResult;
use indexshift_client::ContentType;
use indexshift_core::{IndexSet, ScopeSet, ScopeValue, StepOutcome};
use indexshift_template::names::SEARCH_SCOPES;
use indexshift_template::Substitutions;
use serde_json::Value;

/// Distinct scope values and how the aggregation went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeExtraction {
    pub values: ScopeSet,
    /// `None` when there was nothing to search
    pub outcome: Option<StepOutcome>,
}

impl ScopeExtraction {
    fn failed(reason: impl Into<String>, http_status: Option<u16>) -> Self {
        Self {
            values: ScopeSet::new(),
            outcome: Some(StepOutcome::failed(reason, http_status)),
        }
    }
}

/// Aggregate the distinct `scope` values across all `indices` in one search.
///
/// Failures here are soft: the caller gets an empty set and a `Failed`
/// outcome.
pub async fn extract_distinct_values(
    ctx: &MigrationContext<'_>,
    indices: &IndexSet,
) -> MigrateResult<ScopeExtraction> {
    if indices.is_empty() {
        return Ok(ScopeExtraction {
            values: ScopeSet::new(),
            outcome: None,
        });
    }

    let body = ctx.templates.render(SEARCH_SCOPES, &Substitutions::new())?;
    let joined = indices
        .iter()
        .map(|i| i.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let path = format!("{}/_search", joined);
    let resp = ctx.client.post(&path, &body, ContentType::Json).await?;

    if !resp.is_ok() {
        let reason = super::error_reason(&resp.body);
        log::error!(
            "Failed to collect scopes (status {}): {}",
            resp.status,
            reason
        );
        return Ok(ScopeExtraction::failed(reason, Some(resp.status)));
    }

    let json = match resp.json() {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to parse scope aggregation: {}", e);
            return Ok(ScopeExtraction::failed(
                format!("unparsable aggregation response: {}", e),
                Some(resp.status),
            ));
        }
    };
    let Some(buckets) = json
        .pointer("/aggregations/scopes/buckets")
        .and_then(Value::as_array)
    else {
        log::error!("Scope aggregation response has no buckets");
        return Ok(ScopeExtraction::failed(
            "aggregation response has no scope buckets",
            Some(resp.status),
        ));
    };

    if let Some(count) = json
        .pointer("/aggregations/bucketInfos/count")
        .and_then(Value::as_u64)
    {
        log::info!("Found {} scope bucket(s)", count);
    }

    let values: ScopeSet = buckets
        .iter()
        .filter_map(|bucket| match bucket.get("key")? {
            Value::String(s) => Some(ScopeValue::new(s.as_str())),
            Value::Number(n) => Some(ScopeValue::new(n.to_string())),
            _ => None,
        })
        .collect();

    log::info!("Collected {} distinct scope(s)", values.len());
    let details = format!("{} distinct value(s)", values.len());
    Ok(ScopeExtraction {
        values,
        outcome: Some(StepOutcome::success(details)),
    })
}

#[cfg(test)]
#[path = "scopes_test.rs"]
mod tests;
