//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Indexshift - versioned schema migrations for search-engine indices
#[derive(Parser, Debug)]
#[command(name = "indexshift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: indexshift.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered migrations
    List(ListArgs),

    /// Migrate a cluster from a recorded schema version
    Migrate(MigrateArgs),

    /// Render a bundled request body for inspection
    Render(RenderArgs),
}

/// Output formats shared by list and migrate
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Schema version the cluster is currently at (e.g. 1.5.0)
    #[arg(long)]
    pub from_version: String,

    /// Stop after reaching this version (default: latest known)
    #[arg(long)]
    pub to_version: Option<String>,

    /// Search engine address, overriding the config file
    #[arg(long, env = "INDEXSHIFT_ADDRESS")]
    pub address: Option<String>,

    /// Index name prefix, overriding the config file
    #[arg(long)]
    pub prefix: Option<String>,

    /// Accept config and default values without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Fail when a request body has unresolved placeholders
    #[arg(long)]
    pub strict_templates: bool,

    /// Check per-item results of bulk requests
    #[arg(long)]
    pub verify_bulk: bool,

    /// Directory with request body overrides
    #[arg(long)]
    pub templates_dir: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template name (e.g. scope_index.json)
    pub template: String,

    /// Placeholder value, as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Fail on unresolved placeholders
    #[arg(long)]
    pub strict: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
