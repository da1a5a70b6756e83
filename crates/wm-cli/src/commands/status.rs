//! Status command implementation

use anyhow::{Context, Result};
use std::path::Path;
use wm_db::SqliteBackend;

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common;

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let root = Path::new(&global.project_dir);
    let config = common::load_config(root, global)?;

    let manifest_path = common::resolve_manifest_path(root, &args.manifest, &config)?;
    let manifest = common::load_manifest(&manifest_path)?;

    let db = SqliteBackend::new(&args.database)
        .with_context(|| format!("Failed to open database {}", args.database))?;

    let status = wm_runner::status(&manifest, &db)
        .await
        .context("Failed to read migration status")?;

    println!("Applied ({}):", status.applied.len());
    for entry in &status.applied {
        println!("  {} (when {})", entry.tag, entry.when);
    }
    println!("Pending ({}):", status.pending.len());
    for entry in &status.pending {
        println!("  {} (when {})", entry.tag, entry.when);
    }
    Ok(())
}
