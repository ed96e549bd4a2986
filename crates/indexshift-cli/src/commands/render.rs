//! Render command implementation - print a request body with placeholders filled

use anyhow::{bail, Context, Result};
use indexshift_core::TemplateMode;
use indexshift_template::{Substitutions, TemplateSet};

use crate::cli::{GlobalArgs, RenderArgs};
use crate::commands::common::load_config;

/// Execute the render command
pub async fn execute(args: &RenderArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let mode = if args.strict {
        TemplateMode::Strict
    } else {
        config.templates.mode
    };
    let templates = TemplateSet::new(mode, config.templates.dir.clone());

    if !TemplateSet::names().contains(&args.template.as_str()) {
        bail!(
            "Unknown template '{}'. Available: {}",
            args.template,
            TemplateSet::names().join(", ")
        );
    }

    let substitutions = parse_assignments(&args.set)?;
    if global.verbose {
        let keys: Vec<&str> = substitutions.keys().collect();
        eprintln!("[verbose] Rendering {} with {:?}", args.template, keys);
    }

    let rendered = templates
        .render(&args.template, &substitutions)
        .with_context(|| format!("Failed to render {}", args.template))?;
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Parse `key=value` pairs; values are inserted verbatim.
pub(crate) fn parse_assignments(pairs: &[String]) -> Result<Substitutions> {
    let mut substitutions = Substitutions::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid --set '{}': expected key=value", pair);
        };
        let key = key.trim().trim_start_matches('$');
        if key.is_empty() {
            bail!("Invalid --set '{}': empty key", pair);
        }
        substitutions.insert(key, value);
    }
    Ok(substitutions)
}
