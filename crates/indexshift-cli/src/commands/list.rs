//! List command implementation

use anyhow::Result;
use indexshift_migrate::MigrationRegistry;

use crate::cli::{GlobalArgs, ListArgs, OutputFormat};
use crate::commands::common::{print_json, print_table};

/// Execute the list command
pub async fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<()> {
    let registry = MigrationRegistry::builtin();
    let descriptors = registry.descriptors();

    if global.verbose {
        eprintln!("[verbose] {} migration(s) registered", descriptors.len());
    }

    match args.output {
        OutputFormat::Json => print_json(&descriptors)?,
        OutputFormat::Text => {
            let rows: Vec<Vec<String>> = descriptors
                .iter()
                .map(|d| {
                    vec![
                        d.from_version.to_string(),
                        d.to_version.to_string(),
                        d.description.clone(),
                    ]
                })
                .collect();
            print_table(&["FROM", "TO", "DESCRIPTION"], &rows);
        }
    }

    Ok(())
}
