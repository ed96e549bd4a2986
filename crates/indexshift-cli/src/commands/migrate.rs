//! Migrate command implementation

use anyhow::{Context, Result};
use indexshift_client::{HttpConfig, HttpIndexClient, IndexClient};
use indexshift_core::{
    parse_version, BulkVerification, Config, IndexName, MigrationReport, StepOutcome,
    TemplateMode,
};
use indexshift_migrate::steps::aux_index_exists;
use indexshift_migrate::{MigrationContext, MigrationParams, MigrationRegistry};
use indexshift_template::TemplateSet;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::{GlobalArgs, MigrateArgs, OutputFormat};
use crate::commands::common::{load_config, print_json, ExitCode, EXIT_STEP_FAILURES};
use crate::commands::prompt::{ask_parsed, LinePrompter, Prompter};

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let start_time = Instant::now();
    let from = parse_version(&args.from_version).context("Invalid --from-version")?;
    let to = args
        .to_version
        .as_deref()
        .map(parse_version)
        .transpose()
        .context("Invalid --to-version")?;

    let mut config = load_config(global)?;
    apply_overrides(&mut config, args);
    config.validate().context("Invalid configuration")?;

    let registry = MigrationRegistry::builtin();
    let plan = registry.plan(&from, to.as_ref());
    if plan.is_empty() {
        println!("No migration applies to schema version {}", from);
        return Ok(());
    }
    if global.verbose {
        for migration in &plan {
            eprintln!("[verbose] Planned: {}", migration.descriptor());
        }
    }

    let client = HttpIndexClient::new(&HttpConfig::from_config(&config))
        .context("Failed to create search engine client")?;
    let mut params = MigrationParams::from_config(&config);
    if !args.yes {
        let mut prompter = LinePrompter::stdio();
        params = collect_params(&mut prompter, &client, params, args.prefix.is_none()).await?;
    }
    params.validate().context("Invalid migration parameters")?;

    let templates = TemplateSet::from_config(&config.templates);
    let ctx = MigrationContext::new(&client, &templates, params);
    if global.verbose {
        eprintln!("[verbose] {:?}", ctx);
    }

    let reports = registry
        .run(&ctx, &from, to.as_ref())
        .await
        .context("Migration aborted")?;

    match args.output {
        OutputFormat::Json => print_json(&reports)?,
        OutputFormat::Text => {
            for report in &reports {
                print_report(report);
            }
            println!("\nTotal time: {}ms", start_time.elapsed().as_millis());
        }
    }

    let failures: usize = reports.iter().map(MigrationReport::failure_count).sum();
    if failures > 0 {
        return Err(ExitCode(EXIT_STEP_FAILURES).into());
    }
    Ok(())
}

/// Command-line flags win over config file values.
pub(crate) fn apply_overrides(config: &mut Config, args: &MigrateArgs) {
    if let Some(address) = &args.address {
        config.address = address.clone();
    }
    if let Some(prefix) = &args.prefix {
        config.index_prefix = prefix.clone();
    }
    if args.strict_templates {
        config.templates.mode = TemplateMode::Strict;
    }
    if let Some(dir) = &args.templates_dir {
        config.templates.dir = Some(PathBuf::from(dir));
    }
    if args.verify_bulk {
        config.bulk_verification = BulkVerification::Strict;
    }
}

/// Ask for everything the run needs before any step touches the cluster.
///
/// Scope index settings are only asked for when the index does not exist
/// yet; the probe is read-only.
pub(crate) async fn collect_params(
    prompter: &mut dyn Prompter,
    client: &dyn IndexClient,
    mut params: MigrationParams,
    ask_prefix: bool,
) -> Result<MigrationParams> {
    if ask_prefix {
        params.index_prefix = prompter.ask("Index prefix", &params.index_prefix)?;
    }

    let scope_index = IndexName::scope_index(&params.index_prefix)
        .with_context(|| format!("Invalid index prefix '{}'", params.index_prefix))?;
    let exists = aux_index_exists(client, &scope_index)
        .await
        .with_context(|| format!("Failed to check whether {} exists", scope_index))?;
    if exists {
        log::info!("Index {} already exists, its settings are kept", scope_index);
        return Ok(params);
    }

    let settings = &mut params.scope_index;
    settings.number_of_shards = ask_parsed(
        prompter,
        &format!("Number of shards for {}", scope_index),
        settings.number_of_shards,
    )?;
    settings.number_of_replicas = ask_parsed(
        prompter,
        &format!("Number of replicas for {}", scope_index),
        settings.number_of_replicas,
    )?;
    settings.total_fields_limit = ask_parsed(
        prompter,
        "Mapping total fields limit",
        settings.total_fields_limit,
    )?;
    settings.max_docvalue_fields_search = ask_parsed(
        prompter,
        "Max docvalue fields search",
        settings.max_docvalue_fields_search,
    )?;
    Ok(params)
}

fn outcome_line(label: &str, outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Success { details } | StepOutcome::AlreadyApplied { details } => {
            format!("  \u{2713} {} ({})", label, details)
        }
        StepOutcome::Failed {
            reason,
            http_status: Some(status),
        } => format!("  \u{2717} {}: {} [HTTP {}]", label, reason, status),
        StepOutcome::Failed { reason, .. } => format!("  \u{2717} {}: {}", label, reason),
    }
}

fn print_report(report: &MigrationReport) {
    println!("Migration {}\n", report.migration.label());

    if report.indices.is_empty() {
        println!("  - no event indices found");
    }
    for index in &report.indices {
        println!("{}", outcome_line(&format!("{} mapping", index.index), &index.mapping));
        if let Some(backfill) = &index.backfill {
            println!("{}", outcome_line(&format!("{} backfill", index.index), backfill));
        }
    }
    if let Some(aux) = &report.aux_index {
        println!("{}", outcome_line("scope index", aux));
    }
    if let Some(values) = &report.distinct_values {
        println!("{}", outcome_line("scope extraction", values));
    }
    if let Some(bulk) = &report.bulk_insert {
        println!("{}", outcome_line("scope insert", bulk));
    }

    let failures = report.failure_count();
    if failures == 0 {
        println!("\nCompleted {}", report.migration.label());
    } else {
        println!("\n{} step(s) failed", failures);
        let failed = report.failed_indices();
        if !failed.is_empty() {
            let names: Vec<&str> = failed.iter().map(|i| i.as_str()).collect();
            println!("Re-run to retry: {}", names.join(", "));
        }
    }
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
