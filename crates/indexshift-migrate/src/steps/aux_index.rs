use crate::context::MigrationContext;
use crate::error::{MigrateError, MigrateResult};
use indexshift_client::IndexClient;
use indexshift_core::{IndexName, ScopeIndexSettings, StepOutcome};
use indexshift_template::names::SCOPE_INDEX;
use indexshift_template::Substitutions;

/// Whether `index` exists. Any non-200 answer counts as absent.
pub async fn aux_index_exists(client: &dyn IndexClient, index: &IndexName) -> MigrateResult<bool> {
    let resp = client.get(index.as_str()).await?;
    Ok(resp.is_ok())
}

fn settings_substitutions(settings: &ScopeIndexSettings) -> Substitutions {
    Substitutions::new()
        .with("numberOfShards", settings.number_of_shards)
        .with("numberOfReplicas", settings.number_of_replicas)
        .with("mappingTotalFieldsLimit", settings.total_fields_limit)
        .with("maxDocValueFieldsSearch", settings.max_docvalue_fields_search)
}

/// Create `<prefix>-scope` unless it already exists.
///
/// A failed creation is fatal for the run: nothing after this step can
/// succeed without the index.
pub async fn ensure_aux_index(ctx: &MigrationContext<'_>) -> MigrateResult<StepOutcome> {
    let index = ctx.params.scope_index_name()?;

    if aux_index_exists(ctx.client, &index).await? {
        log::info!("Index {} already exists, skipping creation", index);
        return Ok(StepOutcome::already_applied(format!("{} exists", index)));
    }

    let settings = &ctx.params.scope_index;
    let body = ctx
        .templates
        .render(SCOPE_INDEX, &settings_substitutions(settings))?;
    let resp = ctx.client.put(index.as_str(), &body).await?;
    if !resp.is_ok() {
        log::error!(
            "Can not create the index {} (status {}): {}",
            index,
            resp.status,
            super::error_reason(&resp.body)
        );
        return Err(MigrateError::AuxIndexCreation {
            index: index.into_inner(),
            status: resp.status,
            body: resp.body,
        });
    }

    log::info!(
        "Created index {} ({} shard(s), {} replica(s))",
        index,
        settings.number_of_shards,
        settings.number_of_replicas
    );
    Ok(StepOutcome::success(format!("{} created", index)))
}

#[cfg(test)]
#[path = "aux_index_test.rs"]
mod tests;
