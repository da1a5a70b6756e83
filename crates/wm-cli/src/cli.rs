//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Waymark - compile SQL migration journals into embeddable manifests and
/// apply them
#[derive(Parser, Debug)]
#[command(name = "wm")]
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

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the migration journal into a manifest artifact
    Compile(CompileArgs),

    /// Apply pending migrations from a manifest to a database
    Apply(ApplyArgs),

    /// Show which migrations are applied and which are pending
    Status(StatusArgs),
}

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Override manifest output path
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Manifest artifact path (default: resolved from config)
    #[arg(short, long)]
    pub manifest: Option<String>,

    /// SQLite database path (:memory: accepted)
    #[arg(short, long)]
    pub database: String,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Manifest artifact path (default: resolved from config)
    #[arg(short, long)]
    pub manifest: Option<String>,

    /// SQLite database path (:memory: accepted)
    #[arg(short, long)]
    pub database: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
